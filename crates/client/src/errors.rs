use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(String),
    /// The body is not valid JSON for the requested type.
    #[error("parse error: {0}")]
    Parse(String),
    /// Non-2xx status under `StatusPolicy::RequireSuccess`.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Status { .. } => "status",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}
