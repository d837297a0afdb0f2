//! Error types for LEAP Finder

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeapError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type LeapResult<T> = Result<T, LeapError>;

impl LeapError {
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Transport failures may succeed on a later attempt; bad data and bad
    /// parameters will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
