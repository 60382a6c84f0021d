use thiserror::Error;

/// Errors raised by a user source while retrieving records.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream responded with HTTP {status}")]
    Status { status: u16 },

    #[error("failed to decode upstream payload: {message}")]
    Decode { message: String },

    #[error("invalid source URL: {message}")]
    InvalidUrl { message: String },
}

impl SourceError {
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }
}

/// Errors that are safe to expose to callers of the summary service.
///
/// The aggregation itself never fails; all fallibility comes from the
/// user source.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("failed to fetch users: {0}")]
    Source(#[from] SourceError),
}
