#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("field with name '{0}' does not exist")]
    NotFound(String),

    #[error("api error ({status}): {message}")]
    Api {
        status: http::StatusCode,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl From<ureq::Error> for ClientError {
    fn from(e: ureq::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl ClientError {
    pub fn status_code(&self) -> Option<http::StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
