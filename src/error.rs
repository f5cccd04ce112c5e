//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror` (see
//! [`crate::providers::domain::ProviderError`]); the CLI surface uses `anyhow`
//! for convenient propagation. This enum is the bridge between the two.

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Provider query or stream resolution error
    #[error("Provider error: {0}")]
    Provider(#[from] crate::providers::domain::ProviderError),

    /// Invalid user input (bad source tag, malformed id)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::domain::ProviderError;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input("unknown source 'spotify'");
        assert!(err.to_string().contains("spotify"));
    }

    #[test]
    fn test_provider_error_converts() {
        let err: Error = ProviderError::Unavailable("jamendo").into();
        assert!(err.to_string().contains("jamendo"));
    }
}
