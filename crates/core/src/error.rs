use thiserror::Error;

/// Errors raised by core domain parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid device type: {0}")]
    InvalidDeviceType(String),
}
