// Configuration structs

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Text-generation collaborator (Groq) settings
    pub groq: GroqConfig,

    /// Reporting backend API settings
    pub backend: BackendConfig,

    /// Emergency contact values surfaced by the safety sub-flow.
    /// Safety-critical: the safety flow shows these verbatim.
    pub contacts: EmergencyContacts,

    /// Directory for payloads saved when submission fails
    pub outbox_dir: PathBuf,

    /// Optional override for the crisis keyword list
    pub crisis_keywords_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry_attempts: u32,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "openai/gpt-oss-20b".to_string(),
            base_url: "https://api.groq.com/openai".to_string(),
            timeout_secs: 30,
            retry_attempts: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            auth_token: None,
        }
    }
}

/// Emergency contacts for the crisis safety flow.
///
/// Update the numbers here (or in config.toml) when the PPKS contact
/// changes; nothing else in the codebase hardcodes them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmergencyContacts {
    /// WhatsApp number in URL form, e.g. "+6282188467793"
    pub whatsapp_number: String,
    /// WhatsApp number formatted for display
    pub whatsapp_display: String,
    pub emergency: String,
    pub hotline_kemenkes: String,
    pub counseling_email: String,
}

impl Default for EmergencyContacts {
    fn default() -> Self {
        Self {
            whatsapp_number: "+6282188467793".to_string(),
            whatsapp_display: "+62 821-8846-7793".to_string(),
            emergency: "112".to_string(),
            hotline_kemenkes: "119 (ext 8)".to_string(),
            counseling_email: "konseling@telkomuniversity.ac.id".to_string(),
        }
    }
}

impl Config {
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sigap")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq: GroqConfig::default(),
            backend: BackendConfig::default(),
            contacts: EmergencyContacts::default(),
            outbox_dir: Self::data_dir().join("outbox"),
            crisis_keywords_path: None,
        }
    }
}
