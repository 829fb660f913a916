//! Installed / not-installed detection.
use std::fmt;
use std::path::Path;

use crate::error::InstallError;

/// Whether the Intercity stack is present on this machine.
///
/// The install directory is the only persisted state: the deployment
/// repository is cloned into it, so its existence means "installed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallationState {
    /// The marker directory does not exist.
    NotInstalled,
    /// The marker directory exists.
    Installed,
}

impl InstallationState {
    /// Determine the state from the existence of `marker`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Probe`] if existence cannot be determined
    /// (e.g. permission denied on a parent directory).
    pub fn probe(marker: &Path) -> Result<Self, InstallError> {
        match marker.try_exists() {
            Ok(true) => Ok(Self::Installed),
            Ok(false) => Ok(Self::NotInstalled),
            Err(source) => Err(InstallError::Probe {
                path: marker.to_path_buf(),
                source,
            }),
        }
    }

    /// Returns `true` for [`InstallationState::Installed`].
    #[must_use]
    pub const fn is_installed(self) -> bool {
        matches!(self, Self::Installed)
    }
}

impl fmt::Display for InstallationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInstalled => write!(f, "not installed"),
            Self::Installed => write!(f, "installed"),
        }
    }
}
