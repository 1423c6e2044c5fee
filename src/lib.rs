//! Client adapters for a voice assistant: a dialog webhook client, a cloud
//! text-to-speech client, and the WAV encoder that makes the raw speech output
//! playable.

pub mod audio;
pub mod config;
pub mod dialog;
pub mod speech;

pub use config::Config;
