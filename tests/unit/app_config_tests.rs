/*!
 * Unit tests for application configuration
 */

use std::str::FromStr;

use akaire::app_config::{Config, ProofreadingProvider, ProviderConfig};

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_defaultConfig_shouldSelectAnthropic() {
    let config = Config::default();

    assert_eq!(config.proofreading.provider, ProofreadingProvider::Anthropic);
    assert!(config.proofreading.get_provider_config().is_ok());
}

#[test]
fn test_providerConfig_forOllama_shouldCarryLocalEndpoint() {
    let provider_config = ProviderConfig::new(ProofreadingProvider::Ollama);

    assert_eq!(provider_config.endpoint, "http://localhost:11434");
    assert!(provider_config.api_key.is_empty());
}

#[test]
fn test_loadConfig_fromJsonFile_shouldApplyDefaultsForMissingFields() {
    let temp_dir = create_temp_dir().unwrap();
    let content = r#"{
        "proofreading": {
            "provider": "ollama",
            "available_providers": [
                {"type": "ollama", "model": "llama3.2:3b"}
            ]
        }
    }"#;
    let path = create_test_file(&temp_dir.path().to_path_buf(), "conf.json", content).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let config: Config = serde_json::from_reader(file).unwrap();

    assert_eq!(config.proofreading.provider, ProofreadingProvider::Ollama);
    let provider_config = config.proofreading.get_provider_config().unwrap();
    assert_eq!(provider_config.timeout_secs, 120);
    assert_eq!(provider_config.max_tokens, 15000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withEmptyModel_shouldFail() {
    let mut config = Config::default();
    config.proofreading.provider = ProofreadingProvider::Ollama;
    config
        .proofreading
        .get_provider_config_mut()
        .unwrap()
        .model
        .clear();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withMalformedEndpoint_shouldFail() {
    let mut config = Config::default();
    config.proofreading.provider = ProofreadingProvider::Ollama;
    config
        .proofreading
        .get_provider_config_mut()
        .unwrap()
        .endpoint = "not a url".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_getProviderConfig_withMissingEntry_shouldFail() {
    let mut config = Config::default();
    config.proofreading.available_providers.clear();

    assert!(config.proofreading.get_provider_config().is_err());
}

#[test]
fn test_providerDisplayName_shouldBeCapitalized() {
    assert_eq!(ProofreadingProvider::Anthropic.display_name(), "Anthropic");
    assert_eq!(ProofreadingProvider::Ollama.display_name(), "Ollama");
}

#[test]
fn test_providerFromStr_shouldRoundTripThroughDisplay() {
    for provider in [ProofreadingProvider::Anthropic, ProofreadingProvider::Ollama] {
        let parsed = ProofreadingProvider::from_str(&provider.to_string()).unwrap();
        assert_eq!(parsed, provider);
    }
}
