use std::sync::Arc;

use matriz_agent::{Agent, AgentError, GenerationConfig};
use matriz_core::{CritiqueRequest, CritiqueSubject, FieldKey, FieldValue, MatrixData, ResearchType};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::CritiquePrompts;

#[derive(Debug, Error)]
pub enum CritiqueError {
    #[error("La revisión con IA no está disponible para «{0}».")]
    NotAvailable(&'static str),

    #[error("La revisión con IA está desactivada. Configura un proveedor con `matriz init`.")]
    Disabled,

    #[error("Error al consultar la IA: {0}")]
    Agent(#[from] AgentError),

    #[error("La IA devolvió una respuesta vacía.")]
    EmptyResponse,
}

/// Turn any critique result into non-empty text for the user
pub fn display_text(result: &Result<String, CritiqueError>) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(err @ (CritiqueError::NotAvailable(_) | CritiqueError::Disabled)) => {
            format!("ℹ️ {}", err)
        }
        Err(err) => format!("❌ {}", err),
    }
}

/// Sends answers to the configured agent for critique
#[derive(Clone)]
pub struct Critic {
    agent: Arc<dyn Agent>,
    config: GenerationConfig,
}

impl Critic {
    pub fn new(agent: Arc<dyn Agent>, config: GenerationConfig) -> Self {
        Self { agent, config }
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Critique a single answer
    pub async fn critique(
        &self,
        key: FieldKey,
        value: &FieldValue,
        research_type: Option<ResearchType>,
    ) -> Result<String, CritiqueError> {
        let prompt = CritiquePrompts::field_prompt(key, value, research_type)
            .ok_or(CritiqueError::NotAvailable(key.title()))?;
        debug!(field = %key, prompt_len = prompt.len(), "Running field critique");
        self.run(&prompt).await
    }

    /// Critique the coherence of the whole matrix
    pub async fn critique_whole(
        &self,
        data: &MatrixData,
        research_type: Option<ResearchType>,
    ) -> Result<String, CritiqueError> {
        let prompt = CritiquePrompts::matrix_prompt(data, research_type);
        debug!(prompt_len = prompt.len(), "Running matrix critique");
        self.run(&prompt).await
    }

    /// Critique whatever a wizard snapshot asks for
    pub async fn critique_request(&self, request: &CritiqueRequest) -> Result<String, CritiqueError> {
        match &request.subject {
            CritiqueSubject::Field { key, value } => {
                self.critique(*key, value, request.research_type).await
            }
            CritiqueSubject::Matrix(data) => self.critique_whole(data, request.research_type).await,
        }
    }

    async fn run(&self, prompt: &str) -> Result<String, CritiqueError> {
        let output = self
            .agent
            .generate(prompt, &self.config)
            .await
            .map_err(|e| {
                warn!(agent = self.agent.name(), error = %e, "Critique failed");
                CritiqueError::Agent(e)
            })?;

        info!(
            agent = self.agent.name(),
            duration_secs = output.duration.as_secs_f64(),
            response_len = output.text.len(),
            "Critique completed"
        );

        if output.is_empty() {
            return Err(CritiqueError::EmptyResponse);
        }
        Ok(output.text)
    }
}
