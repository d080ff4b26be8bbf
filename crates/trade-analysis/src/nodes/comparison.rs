//! Multi-country comparison node

use crate::client::InferenceClient;
use crate::nodes::{parse_payload, to_prompt_json};
use crate::prompts;
use crate::summary::summarize;
use async_trait::async_trait;
use std::sync::Arc;
use trade_core::{AnalysisState, CountryComparison, Error, NodeId, StatePatch};
use trade_llm::extract_json;
use trade_workflow::TaskNode;

/// Compares the requested countries side by side
pub struct ComparisonNode {
    client: Arc<InferenceClient>,
}

impl ComparisonNode {
    /// Create a new comparison node
    pub fn new(client: Arc<InferenceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskNode for ComparisonNode {
    fn id(&self) -> NodeId {
        NodeId::Comparison
    }

    async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch> {
        if state.countries.is_empty() {
            return Err(Error::Validation(
                "countries are required for comparison analysis".to_string(),
            ));
        }

        // Only the requested countries reach the prompt.
        let summaries: Vec<_> = summarize(&state.market_data)
            .into_iter()
            .filter(|s| state.countries.contains(&s.country))
            .collect();

        let prompt =
            prompts::comparison(&state.code, &state.countries, &to_prompt_json(&summaries)?)?;
        let content = self.client.prompt("comparison", prompt).await?;

        let parsed: CountryComparison = parse_payload(extract_json(&content)?)?;

        Ok(StatePatch {
            country_comparison: Some(parsed),
            ..StatePatch::default()
        })
    }
}
