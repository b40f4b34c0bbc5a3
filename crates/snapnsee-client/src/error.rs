use thiserror::Error;

/// The request never produced an HTTP status (connect, TLS, reset, body read)
#[derive(Debug, Clone, Error)]
#[error("HTTP transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Failures of a single recognition request. None of these are retried.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Invalid image format")]
    InvalidImage(#[source] image::ImageError),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid server response")]
    Decode(#[source] serde_json::Error),

    /// Carries the server's `detail` text, or a generic message
    #[error("{0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    Server(u16),

    #[error(transparent)]
    Network(#[from] TransportError),
}

impl RecognitionError {
    /// Message suitable for showing to the user as-is
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
