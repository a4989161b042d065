use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Proofreading config
    pub proofreading: ProofreadingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Proofreading provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProofreadingProvider {
    // @provider: Anthropic
    #[default]
    Anthropic,
    // @provider: Ollama (local LLM server)
    Ollama,
}

impl ProofreadingProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Anthropic => "anthropic".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }
}

// Implement Display trait for ProofreadingProvider
impl std::fmt::Display for ProofreadingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for ProofreadingProvider
impl std::str::FromStr for ProofreadingProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Max tokens the model may generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Retry attempts after a failed call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    // @field: Base retry backoff in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ProofreadingProvider) -> Self {
        match provider_type {
            ProofreadingProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: String::new(),
                timeout_secs: default_timeout_secs(),
                max_tokens: default_max_tokens(),
                temperature: default_temperature(),
                max_retries: default_max_retries(),
                retry_backoff_ms: default_retry_backoff_ms(),
            },
            ProofreadingProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_timeout_secs(),
                max_tokens: default_max_tokens(),
                temperature: default_temperature(),
                max_retries: default_max_retries(),
                retry_backoff_ms: default_retry_backoff_ms(),
            },
        }
    }
}

/// Proofreading configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProofreadingConfig {
    /// Selected provider
    #[serde(default)]
    pub provider: ProofreadingProvider,

    /// Configuration for each available provider
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Use the fast-path prompt without the detailed guidance
    #[serde(default)]
    pub use_simple_prompt: bool,

    /// Path to a replacement dictionary JSON file
    #[serde(default)]
    pub dictionary_path: Option<String>,
}

impl Default for ProofreadingConfig {
    fn default() -> Self {
        Self {
            provider: ProofreadingProvider::default(),
            available_providers: default_available_providers(),
            use_simple_prompt: false,
            dictionary_path: None,
        }
    }
}

impl ProofreadingConfig {
    /// Get the configuration for the selected provider
    pub fn get_provider_config(&self) -> Result<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
            .ok_or_else(|| anyhow!("No configuration found for provider: {}", provider_str))
    }

    /// Get a mutable configuration for the selected provider
    pub fn get_provider_config_mut(&mut self) -> Result<&mut ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
            .ok_or_else(|| anyhow!("No configuration found for provider: {}", provider_str))
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warn level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_tokens() -> u32 {
    15000
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(ProofreadingProvider::Anthropic),
        ProviderConfig::new(ProofreadingProvider::Ollama),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proofreading: ProofreadingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let provider_config = self.proofreading.get_provider_config()?;

        if provider_config.model.is_empty() {
            return Err(anyhow!(
                "No model configured for provider: {}",
                self.proofreading.provider
            ));
        }

        if self.proofreading.provider == ProofreadingProvider::Anthropic
            && provider_config.api_key.is_empty()
        {
            return Err(anyhow!(
                "An API key is required for the Anthropic provider"
            ));
        }

        if provider_config.max_tokens == 0 {
            return Err(anyhow!("max_tokens must be greater than zero"));
        }

        if !provider_config.endpoint.is_empty() {
            url::Url::parse(&provider_config.endpoint).map_err(|e| {
                anyhow!("Invalid endpoint URL '{}': {}", provider_config.endpoint, e)
            })?;
        }

        Ok(())
    }
}
