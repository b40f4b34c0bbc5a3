use std::path::PathBuf;
use thiserror::Error;

/// A durable-store operation could not be committed
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Notification hour must be between 0 and 23, got {0}")]
    InvalidNotificationHour(u8),

    #[error("Country must be a two-letter code, got '{0}'")]
    InvalidCountry(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
