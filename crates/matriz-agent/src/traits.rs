use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::AgentOutput;

/// Errors that can occur while asking the service for text
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Failed to spawn agent process: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Agent configuration error: {0}")]
    ConfigError(String),

    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    #[error("Authentication failed (HTTP {0})")]
    AuthenticationFailed(u16),

    #[error("Could not reach the service: {0}")]
    Network(String),

    #[error("Service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected response from the service: {0}")]
    InvalidResponse(String),

    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),
}

/// Parameters of one generation call
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Model to use (if the provider supports it)
    pub model: Option<String>,
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// Optional timeout (None = no limit)
    pub timeout: Option<Duration>,
    /// Working directory for CLI agents
    pub working_dir: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_output_tokens: 500,
            temperature: 0.7,
            timeout: Some(Duration::from_secs(60)),
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl GenerationConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Supported providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentType {
    /// OpenAI-compatible chat-completions endpoint
    Http,
    ClaudeCode,
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentType::Http => write!(f, "http"),
            AgentType::ClaudeCode => write!(f, "claude-code"),
        }
    }
}

impl std::str::FromStr for AgentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "openai" | "api" => Ok(AgentType::Http),
            "claude" | "claude-code" | "claudecode" => Ok(AgentType::ClaudeCode),
            _ => Err(format!("Unknown agent type: {}", s)),
        }
    }
}

/// A text-generation service
#[async_trait]
pub trait Agent: Send + Sync {
    /// Human-readable name of the agent (e.g., "OpenAI-compatible API", "Claude Code")
    fn name(&self) -> &str;

    fn agent_type(&self) -> AgentType;

    /// Send one prompt and return the generated text. Attempted exactly once.
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<AgentOutput, AgentError>;

    /// Check whether the agent can be used at all
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_type_parse() {
        assert_eq!("openai".parse::<AgentType>().unwrap(), AgentType::Http);
        assert_eq!("Claude".parse::<AgentType>().unwrap(), AgentType::ClaudeCode);
        assert!("cursor".parse::<AgentType>().is_err());
        assert_eq!(AgentType::ClaudeCode.to_string(), "claude-code");
    }

    #[test]
    fn test_generation_config_builder() {
        let config = GenerationConfig::default()
            .with_model("gpt-4o-mini")
            .with_max_output_tokens(200)
            .with_temperature(0.2);
        assert_eq!(config.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.max_output_tokens, 200);
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    }
}
