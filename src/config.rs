use anyhow::Result;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::speech::config::SynthesisConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system: SystemConfig,
    pub dialog: DialogConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Directory for temporary audio files
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl SystemConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogConfig {
    pub webhook_url: String,
    pub api_key: String,
    pub unit_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,
    pub iam_token: String,
    pub folder_id: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(flatten)]
    pub synthesis: SynthesisConfig,
}

fn default_speech_endpoint() -> String {
    "https://tts.api.cloud.yandex.net/speech/v1/tts:synthesize".to_string()
}

fn default_language() -> String {
    "ru-RU".to_string()
}

impl Config {
    /// Load configuration from a YAML or JSON file.
    ///
    /// `${VAR}` placeholders are replaced with environment variables before
    /// parsing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = read_text_file(path)?;
        let content = substitute_env_vars(&content);

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: Config = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }
}

/// Read a UTF-8 text file, dropping a leading BOM if present
fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
    if had_errors {
        anyhow::bail!("Configuration file is not valid UTF-8: {}", path.display());
    }
    Ok(text.into_owned())
}

/// Replace `${VAR_NAME}` with the value of the environment variable.
/// Unset variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("valid placeholder pattern");
    pattern
        .replace_all(content, |caps: &Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::config::OutputFormat;
    use std::io::Write;

    const YAML: &str = r#"
system:
  request_timeout_secs: 5
dialog:
  webhook_url: "http://localhost:9000/webhook"
  api_key: "${VAA_TEST_API_KEY}"
  unit_key: "unit"
speech:
  iam_token: "${VAA_TEST_UNSET_TOKEN}"
  folder_id: "folder"
  voice: "jane"
  sample_rate_hertz: 16000
"#;

    fn write_temp(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_with_env_substitution() {
        std::env::set_var("VAA_TEST_API_KEY", "secret-key");
        let file = write_temp(".yaml", YAML.as_bytes());

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dialog.api_key, "secret-key");
        assert_eq!(config.speech.iam_token, "${VAA_TEST_UNSET_TOKEN}");
        assert_eq!(config.system.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.system.cache_dir, std::env::temp_dir());
        assert_eq!(config.speech.endpoint, default_speech_endpoint());
        assert_eq!(config.speech.language, "ru-RU");
        assert_eq!(config.speech.synthesis.voice, "jane");
        assert_eq!(config.speech.synthesis.sample_rate_hertz, 16000);
        assert_eq!(config.speech.synthesis.format, OutputFormat::Lpcm);
    }

    #[test]
    fn test_load_json_with_bom() {
        let json = r#"{
            "dialog": { "webhook_url": "http://h/w", "api_key": "a", "unit_key": "u" },
            "speech": { "iam_token": "t", "folder_id": "f", "format": "oggopus" }
        }"#;
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(json.as_bytes());
        let file = write_temp(".json", &bytes);

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dialog.webhook_url, "http://h/w");
        assert_eq!(config.speech.synthesis.format, OutputFormat::OggOpus);
        assert_eq!(config.system.request_timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::load("/nonexistent/conf.yaml").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_missing_required_section_is_an_error() {
        let file = write_temp(".yaml", b"system:\n  request_timeout_secs: 1\n");
        assert!(Config::load(file.path()).is_err());
    }
}
