//! Market-analysis domain layer for trade-rs
//!
//! This crate implements the analysis tasks that run inside the workflow
//! graph:
//!
//! - Summarizing raw per-year observations into per-country aggregates
//! - Six task nodes (fetch, risk, market, stability, suggestions,
//!   comparison) plus the terminal evaluation step
//! - Prompt templates for the inference service
//! - The inference client with bounded retry and a per-call timeout
//! - The `MarketDataSource` boundary to the data store
//! - The [`AnalysisEngine`] invocation boundary with request validation
//!
//! # Example
//!
//! ```rust,ignore
//! use trade_analysis::{AnalysisConfig, AnalysisEngine, AnalysisRequest, StaticMarketData};
//! use trade_core::AnalysisType;
//! use trade_llm::providers::GroqProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = Arc::new(StaticMarketData::from_rows(load_rows()?));
//!     let provider = Arc::new(GroqProvider::from_env()?);
//!     let engine = AnalysisEngine::new(source, provider, AnalysisConfig::default())?;
//!
//!     let state = engine
//!         .analyze(AnalysisRequest {
//!             code: "690100".to_string(),
//!             country: Some("AUSTRALIA".to_string()),
//!             countries: vec![],
//!             analysis_type: Some(AnalysisType::Risk),
//!         })
//!         .await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&state)?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod engine;
pub mod nodes;
pub mod prompts;
pub mod source;
pub mod summary;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types for convenience
pub use client::InferenceClient;
pub use config::AnalysisConfig;
pub use engine::{AnalysisEngine, AnalysisRequest};
pub use source::{MarketDataSource, StaticMarketData};
pub use summary::{CountrySummary, summarize};
