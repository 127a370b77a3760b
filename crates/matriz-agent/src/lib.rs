mod claude;
mod http;
mod output;
mod spawner;
mod traits;

pub use claude::ClaudeCodeAgent;
pub use http::{HttpAgent, HttpConfig, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use output::AgentOutput;
pub use spawner::{ProcessOutput, ProcessSpawner};
pub use traits::{Agent, AgentError, AgentType, GenerationConfig};

/// Create an agent by type. The HTTP settings are ignored by CLI agents.
pub fn create_agent(agent_type: AgentType, http: HttpConfig) -> Box<dyn Agent> {
    match agent_type {
        AgentType::Http => Box::new(HttpAgent::new(http)),
        AgentType::ClaudeCode => Box::new(ClaudeCodeAgent::new()),
    }
}
