//! Inference client with bounded retry and per-call timeout
//!
//! Task nodes never talk to the provider directly: this wrapper owns the
//! retry/timeout policy so raw provider latency and transient failures do
//! not surface straight into a node's error path.

use crate::config::AnalysisConfig;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};
use trade_llm::{CompletionRequest, InferenceProvider, LLMError};

/// Shared inference entry point for all task nodes
pub struct InferenceClient {
    provider: Arc<dyn InferenceProvider>,
    config: Arc<AnalysisConfig>,
}

impl InferenceClient {
    /// Create a new client around an injected provider
    pub fn new(provider: Arc<dyn InferenceProvider>, config: Arc<AnalysisConfig>) -> Self {
        Self { provider, config }
    }

    /// Run one prompt to completion, retrying transient failures
    ///
    /// Each attempt is bounded by `request_timeout`. Only transport-class
    /// failures (request failed, rate limited, timed out) are retried, with
    /// exponential backoff; authentication and invalid-request failures, as
    /// well as an empty completion, return immediately.
    ///
    /// # Arguments
    ///
    /// * `operation` - Name of the calling analysis (for logging)
    /// * `prompt` - The fully rendered prompt text
    ///
    /// # Returns
    ///
    /// The non-empty completion text.
    pub async fn prompt(&self, operation: &str, prompt: String) -> Result<String, LLMError> {
        let request = CompletionRequest::builder(&self.config.model)
            .prompt(prompt)
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature.unwrap_or(0.2))
            .build();

        let max_attempts = self.config.max_retries + 1;
        let mut last_error = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let backoff = self.config.retry_backoff(attempt - 1);
                warn!(
                    "Inference call '{}' failed (attempt {}/{}), retrying in {:?}",
                    operation, attempt, max_attempts, backoff
                );
                sleep(backoff).await;
            }

            let outcome = timeout(
                self.config.request_timeout,
                self.provider.complete(request.clone()),
            )
            .await;

            let result = match outcome {
                Ok(result) => result,
                Err(_) => Err(LLMError::RequestFailed(format!(
                    "timed out after {:?}",
                    self.config.request_timeout
                ))),
            };

            match result {
                Ok(response) => {
                    if response.content.trim().is_empty() {
                        return Err(LLMError::EmptyCompletion);
                    }
                    debug!(
                        "Inference call '{}' completed, {} tokens",
                        operation,
                        response.usage.total()
                    );
                    return Ok(response.content);
                }
                Err(e) if e.is_retryable() => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| LLMError::RequestFailed("retry exhausted with no error".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FailingProvider, FlakyProvider};
    use std::time::Duration;

    fn fast_config(max_retries: u32) -> Arc<AnalysisConfig> {
        Arc::new(
            AnalysisConfig::builder()
                .max_retries(max_retries)
                .retry_backoff_base(Duration::from_millis(1))
                .request_timeout(Duration::from_secs(1))
                .build(),
        )
    }

    #[tokio::test]
    async fn test_success_after_transient_failures() {
        let provider = Arc::new(FlakyProvider::new(2, "{\"ok\": true}"));
        let client = InferenceClient::new(provider.clone(), fast_config(2));

        let content = client.prompt("test", "hello".to_string()).await.unwrap();
        assert_eq!(content, "{\"ok\": true}");
        assert_eq!(provider.attempts(), 3);
    }

    #[tokio::test]
    async fn test_retry_exhaustion_returns_last_error() {
        let provider = Arc::new(FlakyProvider::new(10, "unreached"));
        let client = InferenceClient::new(provider.clone(), fast_config(1));

        let err = client.prompt("test", "hello".to_string()).await.unwrap_err();
        assert!(matches!(err, LLMError::RequestFailed(_)));
        assert_eq!(provider.attempts(), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_is_not_retried() {
        let provider = Arc::new(FailingProvider::new(|| LLMError::AuthenticationFailed));
        let client = InferenceClient::new(provider.clone(), fast_config(3));

        let err = client.prompt("test", "hello".to_string()).await.unwrap_err();
        assert!(matches!(err, LLMError::AuthenticationFailed));
        assert_eq!(provider.attempts(), 1);
    }

    #[tokio::test]
    async fn test_empty_completion_is_an_error() {
        let provider = Arc::new(FlakyProvider::new(0, "   \n"));
        let client = InferenceClient::new(provider.clone(), fast_config(2));

        let err = client.prompt("test", "hello".to_string()).await.unwrap_err();
        assert!(matches!(err, LLMError::EmptyCompletion));
        // Empty content is deterministic, not worth retrying.
        assert_eq!(provider.attempts(), 1);
    }
}
