use thiserror::Error;

/// Failure of a request to the Larder API.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered with a non-2xx status.
    #[error("API request failed: {status} - {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connection refused, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body was not the expected JSON.
    #[error("malformed response body ({status}): {reason}")]
    Decode {
        status: u16,
        body: String,
        reason: String,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

impl RequestError {
    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) | Self::InvalidHeader(_) => None,
        }
    }

    /// Raw response body, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type ClientResult<T> = Result<T, RequestError>;
