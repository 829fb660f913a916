//! Tracing subscriber setup: the console formatter and the per-command log file.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing::field::{Field, Visit};

use super::logger::STAGE_TARGET;
use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// How an event is rendered, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Stage,
    Info,
    Debug,
    Warn,
    Error,
}

impl EventKind {
    fn of(event: &tracing::Event<'_>) -> Self {
        let metadata = event.metadata();
        match *metadata.level() {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO if metadata.target() == STAGE_TARGET => Self::Stage,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// Collects the `message` field of an event.
#[derive(Default)]
struct Message(String);

impl Visit for Message {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut message = Message::default();
    event.record(&mut message);
    message.0
}

/// Appends every event, timestamped and without ANSI codes, to a command's
/// log file.
///
/// Filtered at `DEBUG` independently of the console, so each executed shell
/// command ends up in the file even without `--verbose`.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command` and write a run header.
    ///
    /// Returns `None` if the cache directory or the file is not writable;
    /// the installer then logs to the console only.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at_path(&log_file_path(command)?, command)
    }

    /// Like [`FileLayer::new`] but writing to an explicit `path`.
    pub(super) fn at_path(path: &Path, command: &str) -> Option<Self> {
        let header = format!(
            "==========================================\n\
             intercity-server {} {command} {}\n\
             ==========================================\n",
            crate::VERSION,
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let msg = strip_ansi(&message_of(event));
        let ts = format_utc_time();
        let line = match EventKind::of(event) {
            EventKind::Stage => format!("[{ts}] ---- {msg}"),
            EventKind::Info => format!("[{ts}]     {msg}"),
            EventKind::Debug => format!("[{ts}]     [debug] {msg}"),
            EventKind::Warn => format!("[{ts}]     [warn] {msg}"),
            EventKind::Error => format!("[{ts}]     [error] {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console rendering: bold `---- Step` headers, plain progress lines,
/// coloured `WARNING`/`ERROR` prefixes and dimmed debug output.
struct InstallerFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for InstallerFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let msg = message_of(event);
        match EventKind::of(event) {
            EventKind::Stage => writeln!(writer, "\x1b[1m---- {msg}\x1b[0m"),
            EventKind::Info => writeln!(writer, "{msg}"),
            EventKind::Debug => writeln!(writer, "\x1b[2m{msg}\x1b[0m"),
            EventKind::Warn => writeln!(writer, "\x1b[33mWARNING\x1b[0m {msg}"),
            EventKind::Error => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
        }
    }
}

/// Install the global subscriber for one `command` run.
///
/// Warnings and errors go to stderr, everything else to stdout; `verbose`
/// lets debug lines through to the console. The log file always receives
/// debug lines. Call once, before anything is logged.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let console = fmt::layer()
        .event_format(InstallerFormatter)
        .with_writer(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        )
        .with_filter(console_level);

    let file = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry().with(console).with(file).init();
}
