//! Best-market discovery node

use crate::client::InferenceClient;
use crate::nodes::{parse_payload, to_prompt_json};
use crate::prompts;
use crate::summary::summarize;
use async_trait::async_trait;
use std::sync::Arc;
use trade_core::{AnalysisState, MarketAnalysis, MarketChartPoint, NodeId, StatePatch};
use trade_llm::extract_json;
use trade_workflow::TaskNode;

/// Ranks the top markets by margin and growth potential
pub struct MarketNode {
    client: Arc<InferenceClient>,
}

impl MarketNode {
    /// Create a new market node
    pub fn new(client: Arc<InferenceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskNode for MarketNode {
    fn id(&self) -> NodeId {
        NodeId::Market
    }

    async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch> {
        let summaries = summarize(&state.market_data);
        let prompt = prompts::market(&state.code, &to_prompt_json(&summaries)?)?;
        let content = self.client.prompt("market", prompt).await?;

        let mut parsed: MarketAnalysis = parse_payload(extract_json(&content)?)?;

        // Chart volumes come from the raw rows, not the model: first match
        // per returned country, 0 when the model invents one.
        parsed.chart_data = parsed
            .best_markets
            .iter()
            .map(|m| MarketChartPoint {
                country: m.country.clone(),
                margin: m.margin,
                volume: state
                    .market_data
                    .iter()
                    .find(|d| d.country == m.country)
                    .map_or(0.0, |d| d.volume),
            })
            .collect();

        Ok(StatePatch {
            market_analysis: Some(parsed),
            ..StatePatch::default()
        })
    }
}
