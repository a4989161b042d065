/*!
 * Core proofreading service implementation.
 *
 * This module contains the main ProofreadingService struct, which chains
 * the pipeline stages around the provider call: protect the markup, build
 * the prompt, send it to the configured provider, split the response,
 * parse the correction annotations, restore the markup and render the
 * highlights over the original text. The provider call is the only await
 * point and the only source of fatal errors; every other stage degrades
 * gracefully. All intermediate state is request-local, so concurrent
 * invocations need no synchronization.
 */

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::app_config::{ProofreadingConfig, ProofreadingProvider as ConfigProvider};
use crate::errors::{ProofreadingError, ProviderError};
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};

use super::annotations::{CorrectionRecord, parse_corrections, split_response};
use super::dictionary::ReplacementDictionary;
use super::highlight::highlight;
use super::prompts::{PromptTemplate, ProofreadingPromptBuilder};
use super::protect::protect;
use super::restore::restore;

/// Token usage statistics for tracking API consumption
#[derive(Debug, Clone)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl TokenUsageStats {
    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Add token usage numbers
    pub fn add_token_usage(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>) {
        if let Some(pt) = prompt_tokens {
            self.prompt_tokens += pt;
            self.total_tokens += pt;
        }

        if let Some(ct) = completion_tokens {
            self.completion_tokens += ct;
            self.total_tokens += ct;
        }
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token Usage Summary:\n\
             Provider: {}\n\
             Model: {}\n\
             Prompt tokens: {}\n\
             Completion tokens: {}\n\
             Total tokens: {}\n\
             API request time: {:.2}s",
            self.provider,
            self.model,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.api_duration.as_secs_f64()
        )
    }
}

/// Provider implementation variants
enum ProofreadingProviderImpl {
    /// Anthropic messages API
    Anthropic {
        /// Client instance
        client: Anthropic,
    },

    /// Local Ollama server
    Ollama {
        /// Client instance
        client: Ollama,
    },

    /// Scripted mock, for tests
    Mock {
        /// Client instance
        client: MockProvider,
    },
}

impl ProofreadingProviderImpl {
    fn name(&self) -> &'static str {
        match self {
            Self::Anthropic { .. } => "anthropic",
            Self::Ollama { .. } => "ollama",
            Self::Mock { .. } => "mock",
        }
    }

    fn model(&self) -> String {
        match self {
            Self::Anthropic { client } => client.model().to_string(),
            Self::Ollama { client } => client.model().to_string(),
            Self::Mock { .. } => "mock".to_string(),
        }
    }
}

/// Result of one proofreading run
#[derive(Debug, Clone)]
pub struct ProofreadingOutcome {
    /// The corrected text with all markup restored
    pub corrected_text: String,

    /// The original text re-rendered with highlight units
    pub annotated_html: String,

    /// Every parsed correction record, including those that could not be
    /// located for highlighting
    pub corrections: Vec<CorrectionRecord>,

    /// Token usage for the run
    pub stats: TokenUsageStats,

    /// Wall-clock time for the whole run
    pub processing_time: Duration,
}

/// Main proofreading service
pub struct ProofreadingService {
    /// Provider implementation
    provider: ProofreadingProviderImpl,

    /// Prompt template in use
    template: PromptTemplate,

    /// Replacement dictionary rendered into the prompt
    dictionary: ReplacementDictionary,

    /// Maximum number of tokens the model may generate
    max_tokens: u32,

    /// Sampling temperature
    temperature: f32,

    /// Retry attempts after a failed provider call
    max_retries: u32,

    /// Base backoff between retries, in milliseconds
    retry_backoff_ms: u64,
}

impl ProofreadingService {
    /// Create a new proofreading service from configuration
    pub fn new(config: &ProofreadingConfig) -> anyhow::Result<Self> {
        let provider_config = config.get_provider_config()?;

        let provider = match config.provider {
            ConfigProvider::Anthropic => ProofreadingProviderImpl::Anthropic {
                client: Anthropic::new(
                    provider_config.api_key.clone(),
                    provider_config.endpoint.clone(),
                    provider_config.model.clone(),
                    provider_config.timeout_secs,
                ),
            },
            ConfigProvider::Ollama => ProofreadingProviderImpl::Ollama {
                client: Ollama::new(
                    provider_config.endpoint.clone(),
                    provider_config.model.clone(),
                    provider_config.timeout_secs,
                ),
            },
        };

        let template = if config.use_simple_prompt {
            PromptTemplate::simple()
        } else {
            PromptTemplate::proofreader()
        };

        Ok(Self {
            provider,
            template,
            dictionary: ReplacementDictionary::new(),
            max_tokens: provider_config.max_tokens,
            temperature: provider_config.temperature,
            max_retries: provider_config.max_retries,
            retry_backoff_ms: provider_config.retry_backoff_ms,
        })
    }

    /// Create a service over a mock provider, for tests
    pub fn with_mock(client: MockProvider) -> Self {
        Self {
            provider: ProofreadingProviderImpl::Mock { client },
            template: PromptTemplate::proofreader(),
            dictionary: ReplacementDictionary::new(),
            max_tokens: 15000,
            temperature: 0.2,
            max_retries: 0,
            retry_backoff_ms: 0,
        }
    }

    /// Set the replacement dictionary used for prompt context
    pub fn with_dictionary(mut self, dictionary: ReplacementDictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Use the fast-path prompt template
    pub fn with_simple_prompt(mut self) -> Self {
        self.template = PromptTemplate::simple();
        self
    }

    /// Override the retry policy
    pub fn with_retries(mut self, max_retries: u32, retry_backoff_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_ms = retry_backoff_ms;
        self
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            ProofreadingProviderImpl::Anthropic { client } => client.test_connection().await,
            ProofreadingProviderImpl::Ollama { client } => client.test_connection().await,
            ProofreadingProviderImpl::Mock { client } => client.test_connection().await,
        }
    }

    /// Proofread the given text
    ///
    /// # Arguments
    /// * `raw_text` - The user-visible original, possibly containing HTML
    ///
    /// # Returns
    /// * `ProofreadingOutcome` with corrected text, highlight HTML,
    ///   correction records and usage stats
    pub async fn proofread(&self, raw_text: &str) -> Result<ProofreadingOutcome, ProofreadingError> {
        if raw_text.trim().is_empty() {
            return Err(ProofreadingError::EmptyInput);
        }

        let run_start = Instant::now();
        info!(
            "Proofreading {} characters with provider {}",
            raw_text.chars().count(),
            self.provider.name()
        );

        let document = protect(raw_text);
        debug!(
            "Protected {} markup construct(s) ({} tag(s))",
            document.placeholders.len(),
            document.tags.len()
        );

        let prompt = ProofreadingPromptBuilder::new(self.template.clone())
            .with_dictionary(&self.dictionary)
            .build(&document.text);

        let mut stats = TokenUsageStats::with_provider_info(
            self.provider.name().to_string(),
            self.provider.model(),
        );
        let response_text = self.complete_with_retry(&prompt, &mut stats).await?;

        let (corrected_body, annotation_block) = split_response(&response_text);
        if annotation_block.is_none() {
            warn!("Response carries no annotation delimiter; returning body without corrections");
        }
        let corrections = parse_corrections(&response_text);
        info!("Applying {} correction(s)", corrections.len());

        let corrected_text = restore(corrected_body, &document, &corrections);
        let annotated_html = highlight(raw_text, &corrections);

        Ok(ProofreadingOutcome {
            corrected_text,
            annotated_html,
            corrections,
            stats,
            processing_time: run_start.elapsed(),
        })
    }

    /// Call the provider, retrying with exponential backoff on failure
    async fn complete_with_retry(
        &self,
        prompt: &str,
        stats: &mut TokenUsageStats,
    ) -> Result<String, ProviderError> {
        let mut attempt = 0;
        loop {
            let api_start = Instant::now();
            let result = self.complete_once(prompt, stats).await;
            stats.api_duration += api_start.elapsed();

            match result {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = Duration::from_millis(
                        self.retry_backoff_ms.saturating_mul(1 << attempt.min(10)),
                    );
                    warn!(
                        "Provider call failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempt,
                        self.max_retries + 1,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn complete_once(
        &self,
        prompt: &str,
        stats: &mut TokenUsageStats,
    ) -> Result<String, ProviderError> {
        match &self.provider {
            ProofreadingProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(client.model(), self.max_tokens)
                    .temperature(self.temperature)
                    .add_message("user", prompt);
                let response = client.complete(request).await?;
                stats.add_token_usage(
                    Some(response.usage.input_tokens),
                    Some(response.usage.output_tokens),
                );
                Ok(Anthropic::extract_text(&response))
            }
            ProofreadingProviderImpl::Ollama { client } => {
                let request = GenerationRequest::new(client.model(), prompt)
                    .temperature(self.temperature)
                    .num_predict(self.max_tokens);
                let response = client.complete(request).await?;
                stats.add_token_usage(response.prompt_eval_count, response.eval_count);
                Ok(Ollama::extract_text(&response))
            }
            ProofreadingProviderImpl::Mock { client } => {
                let request = MockRequest {
                    prompt: prompt.to_string(),
                };
                let response = client.complete(request).await?;
                stats.add_token_usage(response.prompt_tokens, response.completion_tokens);
                Ok(MockProvider::extract_text(&response))
            }
        }
    }
}
