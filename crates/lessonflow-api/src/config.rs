use config::{Config as ConfigLoader, ConfigError, Environment, File};
use lessonflow_graph::GraphConfig;
use lessonflow_llm::{ChatOptions, OpenAIConfig};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    pub flow: FlowConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Covers streaming responses too
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_timeout() -> u64 {
    60
}

impl LlmConfig {
    pub fn openai_config(&self, api_key: impl Into<String>) -> OpenAIConfig {
        let mut config =
            OpenAIConfig::new(api_key).with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        config
    }

    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Which content generator the lesson flow uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Template,
    Llm,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Llm => "llm",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    pub generator: GeneratorKind,
    pub max_iterations: usize,
    pub score_threshold: f64,
    pub timeout_secs: u64,
}

impl From<&FlowConfig> for GraphConfig {
    fn from(config: &FlowConfig) -> Self {
        GraphConfig::new()
            .with_max_iterations(config.max_iterations)
            .with_score_threshold(config.score_threshold)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables such as `LESSONFLOW_SERVER__PORT` or
    ///    `LESSONFLOW_FLOW__GENERATOR`
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("LESSONFLOW")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg = config.try_deserialize::<Config>()?.validate()?;

        // Missing key disables the AI endpoints rather than aborting startup
        cfg.openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;
        config.try_deserialize::<Config>()?.validate()
    }

    /// Reject settings that would make every request or run fail
    fn validate(self) -> Result<Self, ConfigError> {
        let timeouts = [
            ("server.request_timeout_secs", self.server.request_timeout_secs),
            ("llm.timeout_secs", self.llm.timeout_secs),
            ("flow.timeout_secs", self.flow.timeout_secs),
        ];
        for (key, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::Message(format!("{key} must be greater than zero")));
            }
        }
        Ok(self)
    }
}
