//! Hand-rolled fakes shared by the test modules in this crate

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use trade_llm::{CompletionRequest, CompletionResponse, InferenceProvider, LLMError, TokenUsage};

/// Provider that answers prompts by matching substring markers
///
/// Concurrently dispatched nodes send different prompts; each is matched
/// against the registered markers so one fake can serve a whole fan-out.
/// Every received prompt is recorded for assertions.
pub(crate) struct ScriptedProvider {
    scripts: Vec<(&'static str, String)>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            scripts: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Register a canned response for prompts containing `marker`
    pub fn respond(mut self, marker: &'static str, response: impl Into<String>) -> Self {
        self.scripts.push((marker, response.into()));
        self
    }

    /// All prompts received so far, in arrival order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }

    /// The first recorded prompt containing `marker`
    pub fn prompt_containing(&self, marker: &str) -> Option<String> {
        self.prompts().into_iter().find(|p| p.contains(marker))
    }
}

#[async_trait]
impl InferenceProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LLMError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(request.prompt.clone());

        for (marker, response) in &self.scripts {
            if request.prompt.contains(marker) {
                return Ok(CompletionResponse {
                    content: response.clone(),
                    usage: TokenUsage::default(),
                });
            }
        }

        // Non-retryable so a missing script fails the test fast.
        Err(LLMError::InvalidRequest(format!(
            "no scripted response for prompt: {}",
            request.prompt.chars().take(80).collect::<String>()
        )))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Provider that fails with a transient error N times, then succeeds
pub(crate) struct FlakyProvider {
    failures_before_success: u32,
    response: String,
    attempts: AtomicU32,
}

impl FlakyProvider {
    pub fn new(failures_before_success: u32, response: impl Into<String>) -> Self {
        Self {
            failures_before_success,
            response: response.into(),
            attempts: AtomicU32::new(0),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceProvider for FlakyProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LLMError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures_before_success {
            return Err(LLMError::RequestFailed("transient failure".to_string()));
        }
        Ok(CompletionResponse {
            content: self.response.clone(),
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &'static str {
        "flaky"
    }
}

/// Provider that always fails with a caller-chosen error
pub(crate) struct FailingProvider {
    make_error: Box<dyn Fn() -> LLMError + Send + Sync>,
    attempts: AtomicU32,
}

impl FailingProvider {
    pub fn new(make_error: impl Fn() -> LLMError + Send + Sync + 'static) -> Self {
        Self {
            make_error: Box::new(make_error),
            attempts: AtomicU32::new(0),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceProvider for FailingProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LLMError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err((self.make_error)())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
