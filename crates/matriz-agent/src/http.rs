//! OpenAI-compatible chat-completions provider.
//!
//! Sends a single user message and returns the first choice's content. No
//! streaming and no retries: every call is attempted exactly once.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::{Agent, AgentError, AgentOutput, AgentType, GenerationConfig};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Endpoint and credentials of the HTTP provider
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    /// Name of the environment variable the key was read from
    pub api_key_env: String,
    api_key: Option<Secret<String>>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
        }
    }
}

impl HttpConfig {
    /// Read the API key from `api_key_env`. A missing or empty variable
    /// leaves the agent unavailable.
    pub fn from_env(base_url: impl Into<String>, api_key_env: impl Into<String>) -> Self {
        let api_key_env = api_key_env.into();
        let api_key = std::env::var(&api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new);
        Self {
            base_url: base_url.into(),
            api_key_env,
            api_key,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

pub struct HttpAgent {
    config: HttpConfig,
    client: Client,
}

impl HttpAgent {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Agent for HttpAgent {
    fn name(&self) -> &str {
        "OpenAI-compatible API"
    }

    fn agent_type(&self) -> AgentType {
        AgentType::Http
    }

    async fn is_available(&self) -> bool {
        self.config.has_api_key()
    }

    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<AgentOutput, AgentError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| AgentError::MissingApiKey(self.config.api_key_env.clone()))?;
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);

        debug!(
            agent = self.name(),
            model,
            prompt_len = prompt.len(),
            "Generating critique"
        );

        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: config.max_output_tokens,
            temperature: config.temperature,
        };

        let start = Instant::now();
        let mut request = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key.expose_secret())
            .json(&body);
        if let Some(timeout) = config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AgentError::Timeout(config.timeout.unwrap_or_default())
            } else if e.is_connect() {
                AgentError::Network(format!("Connection failed: {}", e))
            } else {
                AgentError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AgentError::AuthenticationFailed(status.as_u16()),
                code => AgentError::Http { status: code, body },
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AgentError::InvalidResponse("No choices in response".into()))?;

        let duration = start.elapsed();
        debug!(
            duration_ms = duration.as_millis(),
            response_len = text.len(),
            "Critique received"
        );

        Ok(AgentOutput::new(
            text.trim().to_string(),
            parsed.model.or_else(|| Some(model.to_string())),
            duration,
        ))
    }
}
