//! Error types for the logistic regression trainer

use thiserror::Error;

/// Result type alias for trainer operations
pub type Result<T> = std::result::Result<T, LogRegError>;

/// Main error type for the trainer
#[derive(Error, Debug)]
pub enum LogRegError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Preprocessing error: {0}")]
    PreprocessingError(String),

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Computation error: {0}")]
    ComputationError(String),
}

impl From<polars::error::PolarsError> for LogRegError {
    fn from(err: polars::error::PolarsError) -> Self {
        LogRegError::DataError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LogRegError::DataError("test error".to_string());
        assert_eq!(err.to_string(), "Data error: test error");
    }

    #[test]
    fn test_shape_error_display() {
        let err = LogRegError::ShapeError {
            expected: "4 rows".to_string(),
            actual: "3 rows".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid shape: expected 4 rows, got 3 rows");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LogRegError = io_err.into();
        assert!(matches!(err, LogRegError::IoError(_)));
    }
}
