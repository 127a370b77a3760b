mod config;
mod init;
mod wizard;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use matriz_agent::AgentType;
use matriz_core::{applicable_fields, DocumentFormat, FieldKey, FieldValue, ResearchType};
use matriz_critic::{CritiqueError, CritiquePrompts};
use matriz_logging::{init_tracing, LogFormat};

use crate::config::{Overrides, Provider};

#[derive(Parser, Debug)]
#[command(
    name = "matriz",
    about = "Asistente de terminal para construir matrices de investigación",
    version,
    author,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the wizard (default)
    Run(RunArgs),
    /// Choose a critique provider and write the global config
    Init,
    /// Print the step sequence for a research type
    Schema {
        #[arg(short = 't', long = "type", value_enum)]
        research_type: Option<TypeChoice>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the critique prompt a field would send, without calling the service
    Prompt {
        /// Field key, e.g. `pregunta` or `metodologia.muestra`
        field: String,

        #[arg(short = 't', long = "type", value_enum)]
        research_type: Option<TypeChoice>,

        /// Answer to embed in the prompt
        #[arg(short, long)]
        answer: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Critique provider (overrides config files)
    #[arg(long, value_enum)]
    provider: Option<ProviderChoice>,

    /// Model to use (if the provider supports it)
    #[arg(short, long)]
    model: Option<String>,

    /// Export path (default: ./matriz_investigacion.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum)]
    format: Option<FormatChoice>,

    /// Working directory (default: current directory)
    #[arg(short = 'd', long)]
    working_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Write trace and event logs to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderChoice {
    Http,
    Claude,
    #[value(name = "none")]
    Disabled,
}

impl From<ProviderChoice> for Provider {
    fn from(choice: ProviderChoice) -> Self {
        match choice {
            ProviderChoice::Http => Provider::Agent(AgentType::Http),
            ProviderChoice::Claude => Provider::Agent(AgentType::ClaudeCode),
            ProviderChoice::Disabled => Provider::Disabled,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatChoice {
    Markdown,
    Json,
}

impl From<FormatChoice> for DocumentFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Markdown => DocumentFormat::Markdown,
            FormatChoice::Json => DocumentFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeChoice {
    #[value(alias = "cualitativa")]
    Qualitative,
    #[value(alias = "cuantitativa")]
    Quantitative,
    #[value(alias = "mixta")]
    Mixed,
}

impl From<TypeChoice> for ResearchType {
    fn from(choice: TypeChoice) -> Self {
        match choice {
            TypeChoice::Qualitative => ResearchType::Qualitative,
            TypeChoice::Quantitative => ResearchType::Quantitative,
            TypeChoice::Mixed => ResearchType::Mixed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

impl From<RunArgs> for wizard::RunArgs {
    fn from(args: RunArgs) -> Self {
        Self {
            overrides: Overrides {
                provider: args.provider.map(Into::into),
                model: args.model,
                format: args.format.map(Into::into),
                output: args.output,
            },
            working_dir: args.working_dir,
            log_format: args.log_format.into(),
            log_dir: args.log_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Init) => {
            let _guard = init_tracing("warn", LogFormat::Compact, None);
            init::handle_init().await
        }
        Some(Command::Schema {
            research_type,
            json,
        }) => print_schema(research_type.map(Into::into), json),
        Some(Command::Prompt {
            field,
            research_type,
            answer,
        }) => print_prompt(&field, research_type.map(Into::into), answer),
        Some(Command::Run(args)) => wizard::handle_run(args.into()).await,
        None => {
            if init::is_first_run() {
                eprintln!(
                    "{} Sin configuración global. Ejecuta {} para elegir un proveedor de IA.",
                    "->".dimmed(),
                    "matriz init".bright_cyan()
                );
            }
            wizard::handle_run(cli.run.into()).await
        }
    }
}

fn print_schema(research_type: Option<ResearchType>, json: bool) -> Result<()> {
    let fields = applicable_fields(research_type);

    if json {
        let steps: Vec<serde_json::Value> = fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                serde_json::json!({
                    "step": i + 1,
                    "key": field.key,
                    "title": field.key.title(),
                    "input_kind": field.input_kind,
                    "prompt": field.prompt_text,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    let label = research_type.map(|rt| rt.label()).unwrap_or("sin seleccionar");
    println!("=== Pasos ({}) ===", label);
    for (i, field) in fields.iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            i + 1,
            field.key.as_str().bright_cyan(),
            format!("({})", field.key.title()).dimmed()
        );
        println!("     {}", field.prompt_text);
    }
    println!("Total: {} pasos", fields.len());
    Ok(())
}

fn print_prompt(
    field: &str,
    research_type: Option<ResearchType>,
    answer: Option<String>,
) -> Result<()> {
    let key: FieldKey = field.parse().map_err(|e: String| {
        let valid: Vec<&str> = FieldKey::ALL.iter().map(|k| k.as_str()).collect();
        anyhow::anyhow!("{}\n\n  Campos válidos: {}", e, valid.join(", "))
    })?;

    let value = FieldValue::text(answer.unwrap_or_default());
    match CritiquePrompts::field_prompt(key, &value, research_type) {
        Some(prompt) => {
            println!("{}", prompt);
            Ok(())
        }
        None => Err(CritiqueError::NotAvailable(key.title()).into()),
    }
}
