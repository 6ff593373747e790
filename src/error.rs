use thiserror::Error;

pub type InspectResult<T> = Result<T, InspectError>;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("authentication rejected by the Figma API (HTTP {status}); check FIGMA_TOKEN")]
    Authentication { status: u16 },
    #[error("{what} not found")]
    NotFound { what: String },
    #[error("transport error: {message}")]
    Transport { message: String },
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

impl InspectError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InspectError::NotFound { .. })
    }
}

impl From<reqwest::Error> for InspectError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return InspectError::transport(format!("request timed out: {err}"));
        }
        InspectError::transport(err.to_string())
    }
}

impl From<serde_json::Error> for InspectError {
    fn from(err: serde_json::Error) -> Self {
        InspectError::malformed(err.to_string())
    }
}
