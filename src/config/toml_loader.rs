//! TOML settings file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::InstallError;

/// Deserialize a TOML file into `T`.
///
/// A missing file is not an error: it deserializes from an empty document, so
/// types using `#[serde(default)]` come back with their defaults.
///
/// # Errors
///
/// Returns [`InstallError::Settings`] if the file exists but cannot be read
/// or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, InstallError> {
    let settings_err = |message: String| InstallError::Settings {
        path: path.to_path_buf(),
        message,
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(settings_err(e.to_string())),
    };

    toml::from_str(&content).map_err(|e| settings_err(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq, Eq)]
    #[serde(default)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let sample: Sample = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn parses_present_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        std::fs::write(&path, "name = \"x\"\n").unwrap();
        let sample: Sample = load_config(&path).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "name = [unterminated").unwrap();
        let err = load_config::<Sample>(&path).unwrap_err();
        assert!(matches!(err, InstallError::Settings { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
