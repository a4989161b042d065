/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Echoes the submitted text with an empty annotation block
 * - `MockProvider::missing_delimiter()` - Returns a body without the annotation delimiter
 * - `MockProvider::malformed_annotations()` - Returns annotation lines matching no grammar
 * - `MockProvider::empty()` - Returns an empty response
 * - `MockProvider::failing()` - Always fails with an error
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Marker line the prompts place before the text to correct
const SUBMITTED_TEXT_MARKER: &str = "校正対象：";

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The full prompt, as the service would send it
    pub prompt: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The response text
    pub text: String,
    /// Simulated prompt tokens
    pub prompt_tokens: Option<u64>,
    /// Simulated completion tokens
    pub completion_tokens: Option<u64>,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Echoes the submitted text with a well-formed, empty annotation block
    Working,
    /// Returns the body without the annotation delimiter
    MissingDelimiter,
    /// Returns annotation lines that match neither grammar
    MalformedAnnotations,
    /// Returns an empty response
    Empty,
    /// Fails intermittently (every Nth request)
    Intermittent {
        /// Fail every Nth request
        fail_every: usize,
    },
    /// Always fails with an error
    Failing,
    /// Simulates a slow response (for timeout testing)
    Slow {
        /// Delay before responding, in milliseconds
        delay_ms: u64,
    },
}

/// Mock provider for testing proofreading behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock whose responses lack the annotation delimiter
    pub fn missing_delimiter() -> Self {
        Self::new(MockBehavior::MissingDelimiter)
    }

    /// Create a mock that returns unparseable annotation lines
    pub fn malformed_annotations() -> Self {
        Self::new(MockBehavior::MalformedAnnotations)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Extract the text a prompt submitted for correction
    ///
    /// Falls back to the whole prompt when the marker is absent.
    pub fn submitted_text(request: &MockRequest) -> String {
        let Some(after) = request
            .prompt
            .split_once(SUBMITTED_TEXT_MARKER)
            .map(|(_, after)| after)
        else {
            return request.prompt.clone();
        };
        let body = after.split_once("\n\n修正後の文章").map_or(after, |(b, _)| b);
        body.trim().to_string()
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: MockRequest) -> Result<MockResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(generator) = self.custom_response {
            return Ok(MockResponse {
                text: generator(&request),
                prompt_tokens: Some(100),
                completion_tokens: Some(50),
            });
        }

        let text = match self.behavior {
            MockBehavior::Working => {
                format!("{}\n\n✅修正箇所：\n", Self::submitted_text(&request))
            }
            MockBehavior::MissingDelimiter => Self::submitted_text(&request),
            MockBehavior::MalformedAnnotations => format!(
                "{}\n\n✅修正箇所：\n- この行はどの文法にも一致しません\n- broken -> entry without parens\n",
                Self::submitted_text(&request)
            ),
            MockBehavior::Empty => String::new(),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    return Err(ProviderError::RequestFailed(format!(
                        "Simulated intermittent failure on request {}",
                        count
                    )));
                }
                format!("{}\n\n✅修正箇所：\n", Self::submitted_text(&request))
            }
            MockBehavior::Failing => {
                return Err(ProviderError::RequestFailed(
                    "Simulated provider failure".to_string(),
                ));
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                format!("{}\n\n✅修正箇所：\n", Self::submitted_text(&request))
            }
        };

        Ok(MockResponse {
            text,
            prompt_tokens: Some(100),
            completion_tokens: Some(50),
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &MockResponse) -> String {
        response.text.clone()
    }
}
