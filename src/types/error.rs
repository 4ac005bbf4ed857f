use thiserror::Error;

/// execdash error types
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Transport-level HTTP failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Statistics object failed validation before presentation
    #[error("invalid statistics: {0}")]
    InvalidStats(String),

    /// A fetch task could not be joined
    #[error("join error: {0}")]
    Join(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio::task::JoinError> for DashboardError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for execdash
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Decode("missing items".into());
        assert_eq!(err.to_string(), "decode error: missing items");
    }

    #[test]
    fn test_api_error_display() {
        let err = DashboardError::Api {
            status: 503,
            message: "backend unavailable".into(),
        };
        assert_eq!(err.to_string(), "api error (503): backend unavailable");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
