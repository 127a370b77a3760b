use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Structured log events for a wizard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    SessionStarted {
        session_id: String,
        provider: String,
    },
    StepEntered {
        index: usize,
        total: usize,
        field: String,
    },
    AdvanceRejected {
        field: String,
        reason: String,
    },
    ResearchTypeChanged {
        research_type: String,
        total_steps: usize,
    },
    CritiqueRequested {
        field: Option<String>,
        prompt_len: usize,
    },
    CritiqueCompleted {
        field: Option<String>,
        duration_secs: f64,
        response_len: usize,
    },
    CritiqueFailed {
        field: Option<String>,
        error: String,
    },
    /// Critique response arrived after the answer or step changed
    CritiqueDiscarded {
        field: Option<String>,
    },
    MatrixCompleted {
        total_steps: usize,
    },
    MatrixExported {
        path: String,
        format: String,
        bytes: usize,
    },
    SessionReset,
    SessionEnded {
        completed: bool,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors and visual structure
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

/// Logger for wizard events - handles console output and file logging.
///
/// Console output goes to stderr and can be muted while the terminal UI owns
/// the screen. The file sink, when present, always receives JSON lines.
pub struct Logger {
    format: LogFormat,
    console: AtomicBool,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            console: AtomicBool::new(true),
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            format,
            console: AtomicBool::new(true),
            file_writer: Some(Mutex::new(open_log_file(log_path)?)),
        })
    }

    /// Turn console output on or off. File output is unaffected.
    pub fn set_console(&self, enabled: bool) {
        self.console.store(enabled, Ordering::Relaxed);
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        if !self.console.load(Ordering::Relaxed) {
            return;
        }
        if let Some(text) = self.render(event) {
            let _ = writeln!(std::io::stderr(), "{}", text);
        }
    }

    /// Console text for an event, or `None` when the format skips it
    pub fn render(&self, event: &LogEvent) -> Option<String> {
        match self.format {
            LogFormat::Json => serde_json::to_string(event).ok(),
            LogFormat::Pretty => render_pretty(event),
            LogFormat::Compact => render_compact(event),
        }
    }
}

fn render_pretty(event: &LogEvent) -> Option<String> {
    let text = match event {
        LogEvent::SessionStarted {
            session_id,
            provider,
        } => format!(
            "{} {} {}",
            "▶".bright_blue(),
            "matriz".bold().bright_white(),
            format!("(sesión {}, IA: {})", short_id(session_id), provider).dimmed()
        ),
        LogEvent::StepEntered {
            index,
            total,
            field,
        } => format!(
            "  {} Paso {}/{} {}",
            "→".bright_cyan(),
            index + 1,
            total,
            field.dimmed()
        ),
        LogEvent::AdvanceRejected { field, reason } => format!(
            "    {} {}: {}",
            "⚠".bright_yellow(),
            field,
            reason.bright_yellow()
        ),
        LogEvent::ResearchTypeChanged {
            research_type,
            total_steps,
        } => format!(
            "    {} Tipo: {} ({} pasos)",
            "•".dimmed(),
            research_type.bright_white(),
            total_steps
        ),
        LogEvent::CritiqueRequested { field, .. } => format!(
            "  {} {} {}",
            "▶".bright_magenta(),
            "CRÍTICA".bright_magenta().bold(),
            field.as_deref().unwrap_or("matriz completa").dimmed()
        ),
        LogEvent::CritiqueCompleted { duration_secs, .. } => {
            format!("    {} Listo ({:.1}s)", "✓".bright_green(), duration_secs)
        }
        LogEvent::CritiqueFailed { error, .. } => {
            format!("    {} {}", "✗".bright_red(), error.bright_red())
        }
        // Debug detail, skipped in pretty mode
        LogEvent::CritiqueDiscarded { .. } => return None,
        LogEvent::MatrixCompleted { total_steps } => format!(
            "{} Matriz completa ({} pasos)",
            "✓".bright_green(),
            total_steps
        ),
        LogEvent::MatrixExported { path, format, .. } => format!(
            "{} Matriz exportada a {} ({})",
            "✓".bright_green(),
            path.bright_cyan(),
            format
        ),
        LogEvent::SessionReset => format!("{} Sesión reiniciada", "↺".bright_yellow()),
        LogEvent::SessionEnded { completed: true } => {
            format!("{} Sesión terminada", "■".dimmed())
        }
        LogEvent::SessionEnded { completed: false } => format!(
            "{} Sesión terminada sin completar la matriz. Las respuestas no se guardan.",
            "■".dimmed()
        ),
    };
    Some(text)
}

fn render_compact(event: &LogEvent) -> Option<String> {
    let timestamp = chrono::Utc::now().format("%H:%M:%S");
    let text = match event {
        LogEvent::SessionStarted { provider, .. } => {
            format!("[{}] session:start ai={}", timestamp, provider)
        }
        LogEvent::StepEntered {
            index,
            total,
            field,
        } => format!("[{}] step:{}/{} {}", timestamp, index + 1, total, field),
        LogEvent::AdvanceRejected { field, reason } => {
            format!("[{}] reject:{} {}", timestamp, field, reason)
        }
        LogEvent::ResearchTypeChanged {
            research_type,
            total_steps,
        } => format!("[{}] type:{} steps={}", timestamp, research_type, total_steps),
        LogEvent::CritiqueRequested { field, prompt_len } => format!(
            "[{}] critique:start:{} len={}",
            timestamp,
            field.as_deref().unwrap_or("*"),
            prompt_len
        ),
        LogEvent::CritiqueCompleted {
            field,
            duration_secs,
            ..
        } => format!(
            "[{}] critique:done:{} {:.1}s",
            timestamp,
            field.as_deref().unwrap_or("*"),
            duration_secs
        ),
        LogEvent::CritiqueFailed { field, error } => format!(
            "[{}] critique:error:{} {}",
            timestamp,
            field.as_deref().unwrap_or("*"),
            error
        ),
        LogEvent::CritiqueDiscarded { .. } => return None,
        LogEvent::MatrixCompleted { total_steps } => {
            format!("[{}] matrix:done steps={}", timestamp, total_steps)
        }
        LogEvent::MatrixExported {
            path,
            format,
            bytes,
        } => format!("[{}] export:{} {} {}b", timestamp, format, path, bytes),
        LogEvent::SessionReset => format!("[{}] session:reset", timestamp),
        LogEvent::SessionEnded { completed } => {
            format!("[{}] session:end completed={}", timestamp, completed)
        }
    };
    Some(text)
}

fn open_log_file(log_path: &Path) -> std::io::Result<File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
