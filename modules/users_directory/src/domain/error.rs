use thiserror::Error;

/// Failures reported by the remote users port. Transport-agnostic: adapters
/// flatten their client errors into messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Invalid endpoint: {message}")]
    InvalidEndpoint { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("Malformed response: {message}")]
    Decode { message: String },
}

impl RemoteError {
    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
