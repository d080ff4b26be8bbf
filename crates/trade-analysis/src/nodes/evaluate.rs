//! Terminal evaluation node

use crate::client::InferenceClient;
use crate::prompts;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use trade_core::{AnalysisState, NodeId, StatePatch};
use trade_workflow::TaskNode;

/// Self-check over whatever result slots a run populated
///
/// Always reached exactly once per run. The quality score it asks for is
/// logged and discarded; no state-visible result is ever mutated here, and
/// an internal failure returns the state unchanged rather than failing the
/// run.
pub struct EvaluateNode {
    client: Arc<InferenceClient>,
}

impl EvaluateNode {
    /// Create a new evaluate node
    pub fn new(client: Arc<InferenceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskNode for EvaluateNode {
    fn id(&self) -> NodeId {
        NodeId::Evaluate
    }

    async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch> {
        let results = json!({
            "risk_analysis": state.risk_analysis,
            "market_analysis": state.market_analysis,
            "stability_analysis": state.stability_analysis,
            "smart_suggestions": state.smart_suggestions,
            "country_comparison": state.country_comparison,
        });

        let outcome = async {
            let prompt = prompts::evaluate(&results.to_string())?;
            self.client
                .prompt("evaluate", prompt)
                .await
                .map_err(trade_core::Error::from)
        }
        .await;

        match outcome {
            Ok(assessment) => debug!(chars = assessment.len(), "quality self-check completed"),
            Err(e) => debug!(error = %e, "quality self-check failed; ignoring"),
        }

        Ok(StatePatch::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::testutil::{FailingProvider, ScriptedProvider};
    use std::time::Duration;
    use trade_llm::LLMError;

    fn fast_config() -> Arc<AnalysisConfig> {
        Arc::new(
            AnalysisConfig::builder()
                .max_retries(0)
                .retry_backoff_base(Duration::from_millis(1))
                .build(),
        )
    }

    #[tokio::test]
    async fn test_returns_empty_patch_on_success() {
        let provider = ScriptedProvider::new().respond("quality and completeness", "Score: 85");
        let node = EvaluateNode::new(Arc::new(InferenceClient::new(
            Arc::new(provider),
            fast_config(),
        )));

        let patch = node.run(&AnalysisState::default()).await.unwrap();
        assert!(patch.risk_analysis.is_none());
        assert!(patch.error.is_none());
    }

    #[tokio::test]
    async fn test_inference_failure_is_swallowed() {
        let provider = FailingProvider::new(|| LLMError::RequestFailed("down".to_string()));
        let node = EvaluateNode::new(Arc::new(InferenceClient::new(
            Arc::new(provider),
            fast_config(),
        )));

        // Still Ok: evaluation never fails the run.
        let patch = node.run(&AnalysisState::default()).await.unwrap();
        assert!(patch.error.is_none());
    }
}
