//! Strategic suggestions node

use crate::client::InferenceClient;
use crate::nodes::{parse_payload, to_prompt_json};
use crate::prompts;
use crate::summary::summarize;
use async_trait::async_trait;
use std::sync::Arc;
use trade_core::{AnalysisState, NodeId, SmartSuggestions, StatePatch};
use trade_llm::extract_json;
use trade_workflow::TaskNode;

/// Produces expand/reduce recommendations over all countries
///
/// The parsed payload is returned verbatim; unlike stability there is no
/// post-filtering step.
pub struct SuggestionsNode {
    client: Arc<InferenceClient>,
}

impl SuggestionsNode {
    /// Create a new suggestions node
    pub fn new(client: Arc<InferenceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskNode for SuggestionsNode {
    fn id(&self) -> NodeId {
        NodeId::Suggestions
    }

    async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch> {
        let summaries = summarize(&state.market_data);
        let prompt = prompts::suggestions(&state.code, &to_prompt_json(&summaries)?)?;
        let content = self.client.prompt("suggestions", prompt).await?;

        let parsed: SmartSuggestions = parse_payload(extract_json(&content)?)?;

        Ok(StatePatch {
            smart_suggestions: Some(parsed),
            ..StatePatch::default()
        })
    }
}
