// Configuration loader
// Loads settings from ~/.sigap/config.toml, with environment fallbacks

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::settings::{BackendConfig, Config, EmergencyContacts, GroqConfig};

/// Load configuration from the SIGAP config file or environment.
///
/// Missing file and missing keys fall back to defaults: the engine runs
/// without a Groq key (deterministic fallback replies) and without a
/// reachable backend (offline outbox).
pub fn load_config() -> Result<Config> {
    let config_path = Config::data_dir().join("config.toml");
    let mut config = if config_path.exists() {
        parse_config_file(&config_path)?
    } else {
        Config::default()
    };

    // Environment variables take precedence over the file
    if let Ok(key) = std::env::var("GROQ_API_KEY") {
        if !key.is_empty() {
            config.groq.api_key = Some(key);
        }
    }
    if let Ok(url) = std::env::var("SIGAP_API_URL") {
        if !url.is_empty() {
            config.backend.base_url = url;
        }
    }

    Ok(config)
}

fn parse_config_file(path: &PathBuf) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    #[derive(serde::Deserialize, Default)]
    #[serde(default)]
    struct TomlConfig {
        groq: GroqConfig,
        backend: BackendConfig,
        contacts: EmergencyContacts,
        outbox_dir: Option<PathBuf>,
        crisis_keywords_path: Option<PathBuf>,
    }

    let toml_config: TomlConfig =
        toml::from_str(&contents).context("Failed to parse config.toml")?;

    Ok(Config {
        groq: toml_config.groq,
        backend: toml_config.backend,
        contacts: toml_config.contacts,
        outbox_dir: toml_config
            .outbox_dir
            .unwrap_or_else(|| Config::data_dir().join("outbox")),
        crisis_keywords_path: toml_config.crisis_keywords_path,
    })
}
