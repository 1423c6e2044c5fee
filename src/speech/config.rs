use serde::{Deserialize, Serialize};

/// Audio encoding requested from the speech endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raw 16-bit mono PCM, wrapped into WAV locally
    Lpcm,
    /// Ogg container with Opus audio, stored as returned
    OggOpus,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Lpcm => "lpcm",
            OutputFormat::OggOpus => "oggopus",
        }
    }

    /// File extension of the artifact handed to callers
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Lpcm => "wav",
            OutputFormat::OggOpus => "ogg",
        }
    }
}

/// Voice settings for a synthesis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub voice: String,
    pub emotion: String,
    pub speed: f32,
    pub format: OutputFormat,
    pub sample_rate_hertz: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            voice: "alena".to_string(),
            emotion: "neutral".to_string(),
            speed: 1.0,
            format: OutputFormat::Lpcm,
            sample_rate_hertz: 48000,
        }
    }
}

impl SynthesisConfig {
    /// Query parameters contributed by the voice settings
    pub fn as_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("voice", self.voice.clone()),
            ("emotion", self.emotion.clone()),
            ("speed", self.speed.to_string()),
            ("format", self.format.as_str().to_string()),
            ("sampleRateHertz", self.sample_rate_hertz.to_string()),
        ]
    }
}
