// Reply-generation providers
//
// Abstraction over the text-generation collaborator used by curhat mode.
// The engine talks to a `ReplyGenerator`; whether that is the Groq API or
// a disabled stub is decided at startup from configuration.

use anyhow::Result;
use async_trait::async_trait;

use crate::curhat::ChatTurn;

pub mod groq;
pub mod retry;

pub use groq::GroqProvider;
pub use retry::with_retry_attempts;

/// Context for one generated reply: persona, recent turns, current message.
#[derive(Debug, Clone)]
pub struct ReplyContext {
    pub system: String,
    pub history: Vec<ChatTurn>,
    pub user_message: String,
}

/// Trait for reply generators
///
/// The curhat flow never depends on a generator succeeding: any error is
/// absorbed by the caller, which falls back to template responses.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generate a single supportive reply for the given context
    async fn generate_reply(&self, ctx: &ReplyContext) -> Result<String>;

    /// Get the generator name (e.g., "groq", "disabled")
    fn name(&self) -> &str;
}

/// Generator used when no API key is configured. Always errors, which
/// routes every turn through the template fallback.
pub struct DisabledResponder;

#[async_trait]
impl ReplyGenerator for DisabledResponder {
    async fn generate_reply(&self, _ctx: &ReplyContext) -> Result<String> {
        anyhow::bail!("reply generation is disabled (no API key configured)")
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
