pub mod config;
pub mod interface;
pub mod client;
pub mod error;

pub use config::{OutputFormat, SynthesisConfig};
pub use interface::{with_synthesized, SpeechSynthesizer, SynthesizedSpeech};
pub use client::CloudSpeechClient;
pub use error::SpeechError;
