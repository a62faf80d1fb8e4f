use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    // The gateway call could not complete or its body could not be decoded
    #[error("Transport error: {0}")]
    Transport(String),

    // The gateway answered with a non-success status
    #[error("Gateway returns: {0}")]
    Rejected(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to encode transaction: {0}")]
    Encode(String),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
