//! Fatal errors surfaced by the sync driver.
//!
//! Everything that only affects a single destination is reported through
//! [`crate::report::TargetOutcome`] instead and never reaches this type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Master config not found at {}", .0.display())]
    MasterNotFound(PathBuf),

    #[error("Failed to read master config {}", path.display())]
    MasterRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse master config {}", path.display())]
    MasterParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid sync settings {}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl SyncError {
    /// Hint shown to the user alongside the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SyncError::MasterNotFound(_) => Some("Run 'chezmoi apply' to deploy dotfiles first"),
            _ => None,
        }
    }
}
