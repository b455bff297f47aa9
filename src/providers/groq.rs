// Groq API reply generator
//
// Talks to the Groq chat-completions endpoint, which uses the
// OpenAI-compatible API format.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::retry::with_retry_attempts;
use super::{ReplyContext, ReplyGenerator};
use crate::config::GroqConfig;
use crate::curhat::Role;

#[derive(Clone)]
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry_attempts: u32,
}

impl GroqProvider {
    pub fn new(config: &GroqConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            retry_attempts: config.retry_attempts,
        })
    }

    fn to_request(&self, ctx: &ReplyContext) -> ChatRequest {
        let mut messages = Vec::with_capacity(ctx.history.len() + 2);

        messages.push(ChatMessage {
            role: "system".to_string(),
            content: ctx.system.clone(),
        });

        for turn in &ctx.history {
            let role = match turn.role {
                Role::User => "user",
                Role::Bot => "assistant",
            };
            messages.push(ChatMessage {
                role: role.to_string(),
                content: turn.text.clone(),
            });
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: ctx.user_message.clone(),
        });

        ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    async fn generate_once(&self, ctx: &ReplyContext) -> Result<String> {
        let request = self.to_request(ctx);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!("Sending request to Groq API: model={}", request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Groq API")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Groq API request failed\n\nStatus: {}\nBody: {}", status, error_body);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse Groq API response")?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .context("Groq returned no choices in response")?;

        let text = choice.message.content.trim().to_string();
        if text.is_empty() {
            anyhow::bail!("Groq returned an empty reply");
        }
        Ok(text)
    }
}

#[async_trait]
impl ReplyGenerator for GroqProvider {
    async fn generate_reply(&self, ctx: &ReplyContext) -> Result<String> {
        with_retry_attempts(self.retry_attempts, || self.generate_once(ctx)).await
    }

    fn name(&self) -> &str {
        "groq"
    }
}

// Groq API types (OpenAI-compatible)

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curhat::ChatTurn;

    fn test_config(base_url: String) -> GroqConfig {
        GroqConfig {
            api_key: Some("test-key".to_string()),
            model: "openai/gpt-oss-20b".to_string(),
            base_url,
            timeout_secs: 5,
            retry_attempts: 1,
        }
    }

    fn test_context() -> ReplyContext {
        ReplyContext {
            system: "Kamu adalah pendengar yang baik.".to_string(),
            history: vec![
                ChatTurn {
                    role: Role::User,
                    text: "aku sedang sedih".to_string(),
                },
                ChatTurn {
                    role: Role::Bot,
                    text: "Aku mendengarkan.".to_string(),
                },
            ],
            user_message: "rasanya berat sekali".to_string(),
        }
    }

    #[test]
    fn test_request_ordering() {
        let config = test_config("http://localhost".to_string());
        let provider = GroqProvider::new(&config, "test-key".to_string()).unwrap();
        let request = provider.to_request(&test_context());

        let roles: Vec<&str> = request.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(request.messages.last().unwrap().content, "rasanya berat sekali");
        assert_eq!(request.model, "openai/gpt-oss-20b");
    }

    #[tokio::test]
    async fn test_generate_reply_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Aku di sini untukmu."}}]}"#,
            )
            .create_async()
            .await;

        let config = test_config(server.url());
        let provider = GroqProvider::new(&config, "test-key".to_string()).unwrap();
        let reply = provider.generate_reply(&test_context()).await.unwrap();

        assert_eq!(reply, "Aku di sini untukmu.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_reply_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let config = test_config(server.url());
        let provider = GroqProvider::new(&config, "test-key".to_string()).unwrap();
        assert!(provider.generate_reply(&test_context()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_reply_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  "}}]}"#)
            .create_async()
            .await;

        let config = test_config(server.url());
        let provider = GroqProvider::new(&config, "test-key".to_string()).unwrap();
        assert!(provider.generate_reply(&test_context()).await.is_err());
    }
}
