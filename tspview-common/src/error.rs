//! Common error types for tspview

use thiserror::Error;

/// Common result type for tspview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across tspview crates
#[derive(Error, Debug)]
pub enum Error {
    /// Request rejected before reaching the trace server
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A trace server call did not return success
    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    /// The trace server answered but carried no model payload
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the two outcomes a build degrades on instead of failing
    pub fn is_degradable(&self) -> bool {
        matches!(self, Error::FetchFailure(_) | Error::EmptyResult(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FetchFailure("HTTP 500".to_string());
        assert_eq!(err.to_string(), "Fetch failed: HTTP 500");

        let err = Error::InvalidRequest("resolution must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid request: resolution must be positive"
        );
    }

    #[test]
    fn test_is_degradable() {
        assert!(Error::FetchFailure(String::new()).is_degradable());
        assert!(Error::EmptyResult(String::new()).is_degradable());
        assert!(!Error::InvalidRequest(String::new()).is_degradable());
        assert!(!Error::Config(String::new()).is_degradable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
