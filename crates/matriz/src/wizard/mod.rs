//! Interactive research-matrix wizard.
//!
//! Resolves settings, wires the critique provider, runs the terminal UI and
//! writes the export once the matrix is complete.

mod tui;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{info, warn};
use uuid::Uuid;

use matriz_agent::{create_agent, Agent, AgentType, GenerationConfig, HttpConfig};
use matriz_core::{render_document, DocumentFormat, MatrixData};
use matriz_critic::Critic;
use matriz_logging::{init_tracing, LogEvent, LogFormat, Logger};

use crate::config::{Overrides, Provider, Settings};

/// Event log written next to the trace log
pub const EVENTS_FILE_NAME: &str = "events.jsonl";

/// Arguments for the run command
pub struct RunArgs {
    pub overrides: Overrides,
    pub working_dir: Option<PathBuf>,
    pub log_format: LogFormat,
    pub log_dir: Option<PathBuf>,
}

/// What the user left the wizard with
pub struct SessionOutcome {
    pub data: MatrixData,
    pub completed: bool,
    /// Where the matrix was exported from inside the UI, if it was
    pub exported: Option<PathBuf>,
}

/// Handle the `matriz run` command
pub async fn handle_run(args: RunArgs) -> Result<()> {
    let working_dir = match args.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let settings = Settings::load(&args.overrides, &working_dir)?;
    let output_path = if settings.output.is_absolute() {
        settings.output.clone()
    } else {
        working_dir.join(&settings.output)
    };

    let (_guard, logger) = match args.log_dir {
        Some(ref dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let guard = init_tracing("info", args.log_format, Some(dir));
            let logger = Logger::with_file(args.log_format, &dir.join(EVENTS_FILE_NAME))
                .context("Failed to open the event log")?;
            (guard, logger)
        }
        None => (None, Logger::new(args.log_format)),
    };
    let logger = Arc::new(logger);
    info!(
        provider = %settings.provider,
        format = %settings.format,
        output = %output_path.display(),
        "settings resolved"
    );

    let critic = build_critic(&settings, &working_dir).await;
    let provider = match critic {
        Some(ref critic) => critic.agent_name().to_string(),
        None => Provider::Disabled.to_string(),
    };
    logger.log(&LogEvent::SessionStarted {
        session_id: Uuid::new_v4().to_string(),
        provider,
    });

    // Nothing may write to the terminal while the UI owns it
    logger.set_console(false);
    let outcome = run_ui(critic, logger.clone(), settings.format, output_path.clone()).await;
    logger.set_console(true);
    let outcome = outcome?;

    if outcome.exported.is_none() && outcome.completed {
        let bytes = write_export(&outcome.data, settings.format, &output_path)?;
        logger.log(&LogEvent::MatrixExported {
            path: output_path.display().to_string(),
            format: settings.format.to_string(),
            bytes,
        });
    }
    logger.log(&LogEvent::SessionEnded {
        completed: outcome.completed,
    });

    Ok(())
}

async fn run_ui(
    critic: Option<Critic>,
    logger: Arc<Logger>,
    format: DocumentFormat,
    output_path: PathBuf,
) -> Result<SessionOutcome> {
    let mut app = tui::App::new(critic, logger, format, output_path)?;
    app.run().await
}

/// Build the critic for the configured provider. An unusable provider
/// turns critique off for the session instead of failing the run.
async fn build_critic(settings: &Settings, working_dir: &Path) -> Option<Critic> {
    let Provider::Agent(agent_type) = settings.provider else {
        return None;
    };

    let http = HttpConfig::from_env(&settings.base_url, &settings.api_key_env);
    let agent: Arc<dyn Agent> = Arc::from(create_agent(agent_type, http));

    if !agent.is_available().await {
        warn!(provider = %agent.name(), "provider unavailable, critique disabled");
        eprintln!(
            "{} '{}' no está disponible; la revisión con IA queda desactivada.",
            "⚠".bright_yellow(),
            agent.name()
        );
        if agent_type == AgentType::Http {
            eprintln!(
                "  Define la variable {} o ejecuta {}",
                settings.api_key_env.bright_cyan(),
                "matriz init".bright_cyan()
            );
        }
        return None;
    }

    let mut config = GenerationConfig::default()
        .with_max_output_tokens(settings.max_output_tokens)
        .with_temperature(settings.temperature)
        .with_timeout(settings.timeout);
    if let Some(ref model) = settings.model {
        config = config.with_model(model.clone());
    }
    config.working_dir = working_dir.to_path_buf();

    Some(Critic::new(agent, config))
}

/// Render the matrix and write it to `path`. Returns the bytes written.
pub fn write_export(data: &MatrixData, format: DocumentFormat, path: &Path) -> Result<usize> {
    let bytes = render_document(data, format).context("Failed to render the matrix")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matriz_core::{FieldKey, FieldValue};
    use tempfile::TempDir;

    #[test]
    fn test_write_export_markdown() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("salida").join("matriz.md");

        let mut data = MatrixData::default();
        data.set(FieldKey::Topic, FieldValue::text("Clima escolar en secundaria"));

        let bytes = write_export(&data, DocumentFormat::Markdown, &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(bytes, written.len());
        assert!(written.contains("Clima escolar en secundaria"));
        assert!(written.contains("No definido"));
    }

    #[test]
    fn test_write_export_json_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matriz.json");

        let mut data = MatrixData::default();
        data.set(FieldKey::ResearchType, FieldValue::text("Mixta"));

        write_export(&data, DocumentFormat::Json, &path).unwrap();
        let parsed: MatrixData =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, data);
    }
}
