use thiserror::Error;

/// Errors raised when validating agent hyper-parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}
