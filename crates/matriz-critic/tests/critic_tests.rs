use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use matriz_agent::{Agent, AgentError, AgentOutput, AgentType, GenerationConfig};
use matriz_core::{CritiqueOutcome, FieldKey, FieldValue, MatrixData, ResearchType, Wizard};
use matriz_critic::{display_text, Critic, CritiqueError};

/// Agent double that fails every call like a dropped connection.
struct FailingAgent {
    calls: AtomicUsize,
}

#[async_trait]
impl Agent for FailingAgent {
    fn name(&self) -> &str {
        "failing"
    }

    fn agent_type(&self) -> AgentType {
        AgentType::Http
    }

    async fn generate(
        &self,
        _prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<AgentOutput, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AgentError::Network("connection reset by peer".into()))
    }

    async fn is_available(&self) -> bool {
        true
    }
}

/// Agent double that echoes a canned reply and remembers the last prompt.
struct CannedAgent {
    reply: &'static str,
    last_prompt: std::sync::Mutex<String>,
}

#[async_trait]
impl Agent for CannedAgent {
    fn name(&self) -> &str {
        "canned"
    }

    fn agent_type(&self) -> AgentType {
        AgentType::Http
    }

    async fn generate(
        &self,
        prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<AgentOutput, AgentError> {
        *self.last_prompt.lock().unwrap() = prompt.to_string();
        Ok(AgentOutput::new(
            self.reply.to_string(),
            None,
            Duration::from_millis(5),
        ))
    }

    async fn is_available(&self) -> bool {
        true
    }
}

fn canned(reply: &'static str) -> Arc<CannedAgent> {
    Arc::new(CannedAgent {
        reply,
        last_prompt: std::sync::Mutex::new(String::new()),
    })
}

#[tokio::test]
async fn test_service_failure_becomes_message_and_leaves_wizard_untouched() {
    let agent = Arc::new(FailingAgent {
        calls: AtomicUsize::new(0),
    });
    let critic = Critic::new(agent.clone(), GenerationConfig::default());

    let mut wizard = Wizard::new();
    wizard.edit("Cuantitativa");
    wizard.advance().unwrap();
    wizard.edit("Horas de sueño y rendimiento académico en universitarios");
    let data_before = wizard.data().clone();
    let position_before = wizard.position();

    let request = wizard.begin_field_critique().unwrap();
    let result = critic.critique_request(&request).await;
    assert!(matches!(result, Err(CritiqueError::Agent(_))));

    let text = display_text(&result);
    assert!(!text.trim().is_empty());
    assert!(text.contains("connection reset by peer"));

    assert_eq!(
        wizard.finish_critique(request.ticket, text.clone()),
        CritiqueOutcome::Stored
    );
    assert_eq!(wizard.data(), &data_before);
    assert_eq!(wizard.position(), position_before);
    assert!(!wizard.critique_in_flight());
    assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_choice_fields_are_not_sent() {
    let agent = Arc::new(FailingAgent {
        calls: AtomicUsize::new(0),
    });
    let critic = Critic::new(agent.clone(), GenerationConfig::default());

    let result = critic
        .critique(
            FieldKey::ResearchType,
            &FieldValue::text("Mixta"),
            Some(ResearchType::Mixed),
        )
        .await;
    assert!(matches!(result, Err(CritiqueError::NotAvailable(_))));
    assert!(display_text(&result).contains("no está disponible"));
    assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_field_critique_sends_answer() {
    let agent = canned("Buena pregunta, pero delimita el contexto.");
    let critic = Critic::new(agent.clone(), GenerationConfig::default());

    let text = critic
        .critique(
            FieldKey::Question,
            &FieldValue::text("¿Cómo influye el sueño en las notas?"),
            Some(ResearchType::Quantitative),
        )
        .await
        .unwrap();
    assert_eq!(text, "Buena pregunta, pero delimita el contexto.");

    let prompt = agent.last_prompt.lock().unwrap().clone();
    assert!(prompt.contains("¿Cómo influye el sueño en las notas?"));
    assert!(prompt.contains("cuantitativa"));
}

#[tokio::test]
async fn test_blank_reply_is_an_error() {
    let critic = Critic::new(canned("   "), GenerationConfig::default());
    let result = critic.critique_whole(&MatrixData::default(), None).await;
    assert!(matches!(result, Err(CritiqueError::EmptyResponse)));
    assert!(!display_text(&result).is_empty());
}
