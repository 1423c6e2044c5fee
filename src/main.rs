use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use voice_assistant_adapters::config::Config;
use voice_assistant_adapters::dialog::{DialogApi, Reply, WebhookDialogClient};
use voice_assistant_adapters::speech::CloudSpeechClient;

fn load_config() -> Result<(Config, PathBuf)> {
    let config_paths: Vec<PathBuf> = vec![
        std::env::var("CONFIG_PATH").ok().map(PathBuf::from),
        Some(PathBuf::from("conf.yaml")),
        Some(PathBuf::from("conf.json")),
    ]
    .into_iter()
    .flatten()
    .collect();

    for path in &config_paths {
        match Config::load(path) {
            Ok(cfg) => return Ok((cfg, path.clone())),
            Err(e) => debug!("Failed to load config from {}: {}", path.display(), e),
        }
    }

    anyhow::bail!("Could not find config file. Tried: {:?}", config_paths)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voice_assistant_adapters=debug,voice_assistant=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let query = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: voice-assistant <query> [language]"))?;

    let (config, loaded_path) = load_config()?;
    info!("Loaded configuration from: {}", loaded_path.display());

    let language = args.next().unwrap_or_else(|| config.speech.language.clone());
    let timeout = config.system.request_timeout();
    std::fs::create_dir_all(&config.system.cache_dir)?;

    let dialog = WebhookDialogClient::new(&config.dialog, timeout)?;
    let speech = CloudSpeechClient::new(&config.speech, &config.system.cache_dir, timeout)?;

    let response = dialog.send(dialog.create_request(&query)).await?;
    for reply in &response.replies {
        match reply {
            Reply::Text(text) => info!("Text: {}", text.text),
            Reply::Audio(audio) => info!("Audio: {}", audio.url),
            Reply::Image(image) => info!("Image: {}", image.url),
            Reply::Buttons(buttons) => {
                let labels: Vec<&str> = buttons.buttons.iter().map(|b| b.text.as_str()).collect();
                info!("Buttons: {}", labels.join(" | "));
            }
            Reply::Unknown => debug!("Skipping unsupported reply"),
        }
    }

    let Some(text) = response.speech_text() else {
        info!("Nothing to speak");
        return Ok(());
    };

    let spoken = speech
        .request(&text, &language, |path| match path {
            Some(path) => {
                info!("Speech ready at {}", path.display());
                true
            }
            None => false,
        })
        .await;

    if !spoken {
        warn!("No speech was produced for the reply");
    }

    Ok(())
}
