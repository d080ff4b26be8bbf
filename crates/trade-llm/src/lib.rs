//! Inference provider abstraction for trade-rs
//!
//! This crate defines the boundary to the external natural-language
//! inference service: the [`InferenceProvider`] trait, completion
//! request/response types, a Groq (OpenAI-compatible) provider, and the
//! extractor that recovers structured JSON from unreliable model text.

pub mod completion;
pub mod error;
pub mod extract;
pub mod provider;
pub mod providers;

pub use completion::{CompletionRequest, CompletionRequestBuilder, CompletionResponse, TokenUsage};
pub use error::{ExtractionError, LLMError, Result};
pub use extract::extract_json;
pub use provider::InferenceProvider;
