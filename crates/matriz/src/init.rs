//! Interactive initialization for matriz.
//!
//! Sets up the global config file with the chosen critique provider.

use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Input, Select};

use matriz_agent::{create_agent, AgentType, HttpConfig, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};

use crate::config::{global_config_path, AiConfig, ConfigFile, ExportConfig};

/// Provider info for display and config
struct ProviderInfo {
    display_name: &'static str,
    config_name: &'static str,
    agent_type: Option<AgentType>,
}

const PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        display_name: "API compatible con OpenAI",
        config_name: "http",
        agent_type: Some(AgentType::Http),
    },
    ProviderInfo {
        display_name: "Claude Code (CLI)",
        config_name: "claude",
        agent_type: Some(AgentType::ClaudeCode),
    },
    ProviderInfo {
        display_name: "Sin revisión con IA",
        config_name: "none",
        agent_type: None,
    },
];

pub async fn handle_init() -> Result<()> {
    eprintln!("{}", "Configurando matriz...".bold());
    eprintln!();

    // Step 1: Detect usable providers
    eprintln!("{}", "Buscando proveedores de IA disponibles...".dimmed());

    let mut labels = Vec::new();
    for info in PROVIDERS {
        let Some(agent_type) = info.agent_type else {
            labels.push(info.display_name.to_string());
            continue;
        };
        let http = HttpConfig::from_env(DEFAULT_BASE_URL, DEFAULT_API_KEY_ENV);
        let agent = create_agent(agent_type, http);
        if agent.is_available().await {
            eprintln!(
                "  {} {} ({})",
                "✓".bright_green(),
                info.display_name,
                info.config_name
            );
            labels.push(info.display_name.to_string());
        } else {
            eprintln!("  {} {} (no detectado)", "✗".dimmed(), info.display_name);
            labels.push(format!("{} (no detectado)", info.display_name));
        }
    }
    eprintln!();

    // Step 2: Pick the provider
    let selection = Select::new()
        .with_prompt("Proveedor para la revisión con IA")
        .items(&labels)
        .default(0)
        .interact()?;
    let provider = &PROVIDERS[selection];

    let mut ai = AiConfig {
        provider: Some(provider.config_name.to_string()),
        ..AiConfig::default()
    };

    if provider.agent_type == Some(AgentType::Http) {
        let base_url: String = Input::new()
            .with_prompt("URL base del servicio")
            .default(DEFAULT_BASE_URL.to_string())
            .interact_text()?;
        let api_key_env: String = Input::new()
            .with_prompt("Variable de entorno con la clave de API")
            .default(DEFAULT_API_KEY_ENV.to_string())
            .interact_text()?;
        ai.base_url = Some(base_url);
        ai.api_key_env = Some(api_key_env);
    }

    if provider.agent_type.is_some() {
        let model: String = Input::new()
            .with_prompt("Modelo (vacío para el predeterminado)")
            .allow_empty(true)
            .interact_text()?;
        ai.model = Some(model.trim().to_string()).filter(|m| !m.is_empty());
    }

    // Step 3: Write global config
    let config_path =
        global_config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    if let Some(dir) = config_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    if config_path.exists() {
        eprintln!(
            "{} Ya existe una configuración en {}",
            "⚠".bright_yellow(),
            config_path.display()
        );

        let overwrite = Select::new()
            .with_prompt("¿Reemplazar la configuración existente?")
            .items(&["No, conservarla", "Sí, reemplazarla"])
            .default(0)
            .interact()?;

        if overwrite == 0 {
            eprintln!();
            eprintln!("Se conserva la configuración. Puedes editarla a mano:");
            eprintln!("  {}", config_path.display().to_string().dimmed());
            return Ok(());
        }
    }

    let config = ConfigFile {
        ai,
        export: ExportConfig::default(),
    };
    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    eprintln!();
    eprintln!(
        "{} Configuración guardada en {}",
        "✓".bright_green(),
        config_path.display()
    );

    print_getting_started();

    Ok(())
}

/// Print the getting started guide
pub fn print_getting_started() {
    eprintln!();
    eprintln!("{}", "Primeros pasos:".bold());
    eprintln!("  {} Inicia el asistente: {}", "1.".dimmed(), "matriz".bright_cyan());
    eprintln!(
        "  {} Consulta los pasos de un tipo de investigación: {}",
        "2.".dimmed(),
        "matriz schema --type cuantitativa".bright_cyan()
    );
    eprintln!(
        "  {} Ajustes por proyecto: crea un {} en el directorio de trabajo",
        "3.".dimmed(),
        "matriz.toml".bright_cyan()
    );
}

/// Check if this appears to be first run (no global config)
pub fn is_first_run() -> bool {
    global_config_path().is_some_and(|path| !path.exists())
}
