//! Partner-stability analysis node

use crate::client::InferenceClient;
use crate::nodes::{parse_payload, to_prompt_json};
use crate::prompts;
use crate::summary::summarize;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use trade_core::{AnalysisState, NodeId, StabilityAnalysis, StatePatch};
use trade_llm::extract_json;
use trade_workflow::TaskNode;

/// Scores trading-partner stability across all countries
pub struct StabilityNode {
    client: Arc<InferenceClient>,
}

impl StabilityNode {
    /// Create a new stability node
    pub fn new(client: Arc<InferenceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskNode for StabilityNode {
    fn id(&self) -> NodeId {
        NodeId::Stability
    }

    async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch> {
        let summaries = summarize(&state.market_data);
        let prompt = prompts::stability(&state.code, &to_prompt_json(&summaries)?)?;
        let content = self.client.prompt("stability", prompt).await?;

        let mut parsed: StabilityAnalysis = parse_payload(extract_json(&content)?)?;

        // Zero-stability entries are noise, not signal.
        let before = parsed.partners.len();
        parsed.partners.retain(|p| p.stability_index > 0.0);
        if parsed.partners.len() < before {
            debug!(
                dropped = before - parsed.partners.len(),
                "filtered zero-stability partners"
            );
        }

        Ok(StatePatch {
            stability_analysis: Some(parsed),
            ..StatePatch::default()
        })
    }
}
