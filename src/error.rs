use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with an `error` key.
    #[error("{0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Field is read-only: {0}")]
    ReadOnlyField(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation cancelled: view was unmounted")]
    Cancelled,
}

impl ClientError {
    /// Application-level errors are the only ones shown to the user.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ClientError::Api(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Decode(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
