//! Inference provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for inference providers
///
/// Implementations of this trait give the analysis nodes access to an
/// external text-generating service. Providers are injected at engine
/// construction time; there is no process-global client.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Generate a completion
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with prompt and parameters
    ///
    /// # Returns
    ///
    /// The completion response. Content may be empty and may embed
    /// structured data inside prose or markdown fences; callers run it
    /// through [`crate::extract_json`] rather than trusting the shape.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "groq")
    fn name(&self) -> &str;
}
