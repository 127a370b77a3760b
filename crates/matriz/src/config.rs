//! Configuration file support for matriz.
//!
//! Two files share one format: the global config at
//! `<config_dir>/matriz/config.toml` (written by `matriz init`) and the
//! project config `matriz.toml` in the working directory.
//! Precedence: CLI flags > project > global > built-in defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use matriz_agent::{AgentType, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};
use matriz_core::DocumentFormat;

/// The project config file name
pub const CONFIG_FILE_NAME: &str = "matriz.toml";
/// Directory under the platform config dir
pub const GLOBAL_CONFIG_DIR: &str = "matriz";
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_OUTPUT_STEM: &str = "matriz_investigacion";

/// Contents of a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[ai]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiConfig {
    /// `http`, `claude` or `none`
    pub provider: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

/// `[export]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// `markdown` or `json`
    pub format: Option<String>,
    pub output: Option<PathBuf>,
}

impl ConfigFile {
    /// Load a config file.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(config))
    }

    /// Load `matriz.toml` from the working directory
    pub fn load_project(working_dir: &Path) -> Result<Option<Self>> {
        Self::load_from(&working_dir.join(CONFIG_FILE_NAME))
    }

    /// Load the global config, if the platform has a config directory
    pub fn load_global() -> Result<Option<Self>> {
        match global_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
}

/// Which collaborator answers critique requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Agent(AgentType),
    /// Critique turned off
    Disabled,
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" | "disabled" => Ok(Provider::Disabled),
            other => other.parse::<AgentType>().map(Provider::Agent),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Agent(agent_type) => write!(f, "{}", agent_type),
            Provider::Disabled => write!(f, "none"),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub format: Option<DocumentFormat>,
    pub output: Option<PathBuf>,
}

/// Fully resolved settings for a run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub provider: Provider,
    pub model: Option<String>,
    pub base_url: String,
    pub api_key_env: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub format: DocumentFormat,
    /// Export path; relative paths are resolved against the working directory
    pub output: PathBuf,
}

impl Settings {
    /// Resolve every setting.
    /// Priority: CLI > project config > global config > default
    pub fn resolve(
        cli: &Overrides,
        project: Option<&ConfigFile>,
        global: Option<&ConfigFile>,
    ) -> Result<Self> {
        let layers: Vec<&ConfigFile> = project.into_iter().chain(global).collect();
        let pick = |f: fn(&ConfigFile) -> Option<&str>| layers.iter().find_map(|c| f(c));

        let provider = match cli.provider {
            Some(provider) => provider,
            None => match pick(|c| c.ai.provider.as_deref()) {
                Some(name) => name
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))
                    .context("Invalid [ai].provider")?,
                None => Provider::Agent(AgentType::Http),
            },
        };

        let format = match cli.format {
            Some(format) => format,
            None => match pick(|c| c.export.format.as_deref()) {
                Some(name) => name
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))
                    .context("Invalid [export].format")?,
                None => DocumentFormat::default(),
            },
        };

        let output = cli
            .output
            .clone()
            .or_else(|| layers.iter().find_map(|c| c.export.output.clone()))
            .unwrap_or_else(|| {
                PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension()))
            });

        Ok(Self {
            provider,
            model: cli
                .model
                .clone()
                .or_else(|| pick(|c| c.ai.model.as_deref()).map(String::from)),
            base_url: pick(|c| c.ai.base_url.as_deref())
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
            api_key_env: pick(|c| c.ai.api_key_env.as_deref())
                .unwrap_or(DEFAULT_API_KEY_ENV)
                .to_string(),
            max_output_tokens: layers
                .iter()
                .find_map(|c| c.ai.max_output_tokens)
                .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            temperature: layers
                .iter()
                .find_map(|c| c.ai.temperature)
                .unwrap_or(DEFAULT_TEMPERATURE),
            timeout: Duration::from_secs(
                layers
                    .iter()
                    .find_map(|c| c.ai.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            format,
            output,
        })
    }

    /// Load both config files and resolve against the CLI overrides
    pub fn load(cli: &Overrides, working_dir: &Path) -> Result<Self> {
        let global = ConfigFile::load_global().context("Failed to load global configuration")?;
        let project = ConfigFile::load_project(working_dir)
            .context("Failed to load project configuration")?;
        Self::resolve(cli, project.as_ref(), global.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> ConfigFile {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigFile::load_project(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_valid_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[ai]
provider = "claude"
model = "sonnet"

[export]
format = "json"
"#,
        )
        .unwrap();

        let config = ConfigFile::load_project(dir.path()).unwrap().unwrap();
        assert_eq!(config.ai.provider.as_deref(), Some("claude"));
        assert_eq!(config.ai.model.as_deref(), Some("sonnet"));
        assert_eq!(config.export.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[ai\nprovider = ").unwrap();
        assert!(ConfigFile::load_project(dir.path()).is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[ai]\nprovder = \"http\"\n",
        )
        .unwrap();
        assert!(ConfigFile::load_project(dir.path()).is_err());
    }

    #[test]
    fn test_defaults_without_any_config() {
        let settings = Settings::resolve(&Overrides::default(), None, None).unwrap();
        assert_eq!(settings.provider, Provider::Agent(AgentType::Http));
        assert_eq!(settings.model, None);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(settings.max_output_tokens, 500);
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert_eq!(settings.format, DocumentFormat::Markdown);
        assert_eq!(settings.output, PathBuf::from("matriz_investigacion.md"));
    }

    #[test]
    fn test_precedence_cli_project_global() {
        let global = parse(
            r#"
[ai]
provider = "claude"
model = "global-model"
temperature = 0.2
timeout_secs = 30

[export]
format = "json"
"#,
        );
        let project = parse(
            r#"
[ai]
model = "project-model"
timeout_secs = 10
"#,
        );

        let settings =
            Settings::resolve(&Overrides::default(), Some(&project), Some(&global)).unwrap();
        assert_eq!(settings.provider, Provider::Agent(AgentType::ClaudeCode));
        assert_eq!(settings.model.as_deref(), Some("project-model"));
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.format, DocumentFormat::Json);
        assert_eq!(settings.output, PathBuf::from("matriz_investigacion.json"));

        let cli = Overrides {
            provider: Some(Provider::Disabled),
            model: Some("cli-model".into()),
            format: Some(DocumentFormat::Markdown),
            output: Some(PathBuf::from("salida.md")),
        };
        let settings = Settings::resolve(&cli, Some(&project), Some(&global)).unwrap();
        assert_eq!(settings.provider, Provider::Disabled);
        assert_eq!(settings.model.as_deref(), Some("cli-model"));
        assert_eq!(settings.format, DocumentFormat::Markdown);
        assert_eq!(settings.output, PathBuf::from("salida.md"));
    }

    #[test]
    fn test_invalid_provider_is_an_error() {
        let project = parse("[ai]\nprovider = \"cursor\"\n");
        assert!(Settings::resolve(&Overrides::default(), Some(&project), None).is_err());
    }

    #[test]
    fn test_provider_names() {
        assert_eq!("none".parse::<Provider>().unwrap(), Provider::Disabled);
        assert_eq!(
            "OpenAI".parse::<Provider>().unwrap(),
            Provider::Agent(AgentType::Http)
        );
        assert_eq!(
            "claude-code".parse::<Provider>().unwrap(),
            Provider::Agent(AgentType::ClaudeCode)
        );
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = ConfigFile {
            ai: AiConfig {
                provider: Some("http".into()),
                timeout_secs: Some(45),
                ..AiConfig::default()
            },
            export: ExportConfig::default(),
        };
        let text = config.to_toml().unwrap();
        assert_eq!(parse(&text), config);
    }
}
