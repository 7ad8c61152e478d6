use thiserror::Error;

/// Setup errors. Game death is a state, never an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnakeError {
    #[error("invalid configuration: `{parameter}` {reason}")]
    InvalidConfig {
        parameter: &'static str,
        reason: String,
    },
    #[error("parameter vector has {actual} weights, network needs exactly {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl SnakeError {
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        SnakeError::InvalidConfig {
            parameter,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnakeError>;
