use async_trait::async_trait;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::warn;

use super::config::OutputFormat;
use super::error::SpeechError;

/// Synthesized audio stored in a temporary file.
///
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct SynthesizedSpeech {
    file: NamedTempFile,
    format: OutputFormat,
}

impl SynthesizedSpeech {
    pub(crate) fn new(file: NamedTempFile, format: OutputFormat) -> Self {
        Self { file, format }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Text-to-speech interface
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` spoken in `language` (e.g. `ru-RU`) into a playable file
    async fn synthesize(&self, text: &str, language: &str) -> Result<SynthesizedSpeech, SpeechError>;
}

/// Synthesize speech and hand its file location to `on_response`.
///
/// `on_response` runs exactly once, with `None` if synthesis failed for any
/// reason. The file is deleted as soon as `on_response` returns, so callers
/// must play or copy it before then.
pub async fn with_synthesized<S, F, R>(synthesizer: &S, text: &str, language: &str, on_response: F) -> R
where
    S: SpeechSynthesizer + ?Sized,
    F: FnOnce(Option<&Path>) -> R,
{
    match synthesizer.synthesize(text, language).await {
        Ok(speech) => {
            let result = on_response(Some(speech.path()));
            drop(speech);
            result
        }
        Err(e) => {
            warn!("Speech synthesis failed: {}", e);
            on_response(None)
        }
    }
}
