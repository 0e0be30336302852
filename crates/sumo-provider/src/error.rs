use sumo_client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("only state field is updatable")]
    ImmutableAttribute,

    #[error(
        "invalid value of state field '{0}': only Enabled or Disabled values are accepted"
    )]
    InvalidState(String),

    #[error("field {0} no longer exists")]
    Gone(String),

    #[error("invalid attributes: {0}")]
    Binding(String),

    #[error("provider configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Binding(e.to_string())
    }
}
