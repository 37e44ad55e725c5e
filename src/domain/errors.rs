use thiserror::Error;

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Configuration(String),
}

impl BroadcastError {
    pub fn validation(reason: impl Into<String>) -> Self {
        BroadcastError::Validation(reason.into())
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        BroadcastError::Configuration(reason.into())
    }
}
