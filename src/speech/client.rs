use async_trait::async_trait;
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error};

use super::config::{OutputFormat, SynthesisConfig};
use super::error::SpeechError;
use super::interface::{with_synthesized, SpeechSynthesizer, SynthesizedSpeech};
use crate::audio::{self, AudioFormat};
use crate::config::SpeechConfig;

/// Client for a cloud text-to-speech endpoint authenticated with a bearer token
#[derive(Debug, Clone)]
pub struct CloudSpeechClient {
    client: Client,
    endpoint: String,
    iam_token: String,
    folder_id: String,
    synthesis: SynthesisConfig,
    cache_dir: PathBuf,
}

impl CloudSpeechClient {
    pub fn new(config: &SpeechConfig, cache_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, SpeechError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            iam_token: config.iam_token.clone(),
            folder_id: config.folder_id.clone(),
            synthesis: config.synthesis.clone(),
            cache_dir: cache_dir.into(),
        })
    }

    pub fn synthesis_config(&self) -> &SynthesisConfig {
        &self.synthesis
    }

    /// Completion-style variant of [`SpeechSynthesizer::synthesize`].
    ///
    /// See [`with_synthesized`] for the file lifetime contract.
    pub async fn request<F, R>(&self, text: &str, language: &str, on_response: F) -> R
    where
        F: FnOnce(Option<&Path>) -> R,
    {
        with_synthesized(self, text, language, on_response).await
    }

    fn query_params(&self, text: &str, language: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("folderId", self.folder_id.clone()),
            ("text", text.to_string()),
            ("lang", language.to_string()),
        ];
        params.extend(self.synthesis.as_params());
        params
    }

    /// Turn the response body into the bytes of a playable file
    fn to_container(&self, body: &[u8]) -> Result<Vec<u8>, SpeechError> {
        match self.synthesis.format {
            OutputFormat::Lpcm => {
                let format = AudioFormat::mono_pcm16(self.synthesis.sample_rate_hertz);
                Ok(audio::encode(body, &format)?)
            }
            OutputFormat::OggOpus => Ok(body.to_vec()),
        }
    }

    fn write_temp_file(&self, bytes: &[u8]) -> Result<SynthesizedSpeech, SpeechError> {
        let format = self.synthesis.format;
        let mut file = tempfile::Builder::new()
            .prefix("speech-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile_in(&self.cache_dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(SynthesizedSpeech::new(file, format))
    }
}

#[async_trait]
impl SpeechSynthesizer for CloudSpeechClient {
    async fn synthesize(&self, text: &str, language: &str) -> Result<SynthesizedSpeech, SpeechError> {
        debug!(
            "Sending speech request to {}: lang={}, voice={}, format={}",
            self.endpoint,
            language,
            self.synthesis.voice,
            self.synthesis.format.as_str()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&self.query_params(text, language))
            .bearer_auth(&self.iam_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Speech endpoint returned {}", status);
            return Err(SpeechError::Status(status));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            error!("Speech endpoint returned an empty body");
            return Err(SpeechError::EmptyBody);
        }

        let container = self.to_container(&body)?;
        let speech = self.write_temp_file(&container)?;
        debug!(
            "Speech written to {} ({} bytes)",
            speech.path().display(),
            container.len()
        );
        Ok(speech)
    }
}
