use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("dialog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("dialog webhook returned status {0}")]
    Status(StatusCode),

    #[error("dialog webhook returned an empty body")]
    EmptyBody,

    #[error("failed to decode dialog response: {0}")]
    Decode(#[from] serde_json::Error),
}
