use reqwest::StatusCode;
use thiserror::Error;

use crate::audio::WavError;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("speech endpoint returned status {0}")]
    Status(StatusCode),

    #[error("speech endpoint returned an empty body")]
    EmptyBody,

    #[error("failed to build audio file: {0}")]
    Encode(#[from] WavError),

    #[error("failed to write audio file: {0}")]
    Io(#[from] std::io::Error),
}
