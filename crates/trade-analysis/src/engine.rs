//! Analysis engine - the run invocation boundary
//!
//! Assembles the graph from injected collaborators, validates incoming
//! requests, and exposes one call: [`AnalysisEngine::analyze`].

use crate::client::InferenceClient;
use crate::config::AnalysisConfig;
use crate::nodes::{
    ComparisonNode, EvaluateNode, FetchNode, MarketNode, RiskNode, StabilityNode, SuggestionsNode,
};
use crate::source::MarketDataSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use trade_core::{AnalysisState, AnalysisType, Error};
use trade_llm::InferenceProvider;
use trade_workflow::AnalysisGraph;

/// One analysis request as the caller hands it in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Product classification (HSN) code, always required
    pub code: String,

    /// Target country; required for risk analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Countries to compare; required non-empty for comparison
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,

    /// Requested analysis kind; `None` runs fetch and evaluation only
    #[serde(default)]
    pub analysis_type: Option<AnalysisType>,
}

/// The assembled analysis engine
///
/// Collaborators (data source, inference provider) are injected once at
/// construction; one engine instance serves any number of concurrent runs.
pub struct AnalysisEngine {
    graph: AnalysisGraph,
}

impl AnalysisEngine {
    /// Build an engine from its collaborators
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        provider: Arc<dyn InferenceProvider>,
        config: AnalysisConfig,
    ) -> trade_core::Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let client = Arc::new(InferenceClient::new(provider, config));

        let graph = AnalysisGraph::builder()
            .add_node(Arc::new(FetchNode::new(source)))
            .add_node(Arc::new(RiskNode::new(Arc::clone(&client))))
            .add_node(Arc::new(MarketNode::new(Arc::clone(&client))))
            .add_node(Arc::new(StabilityNode::new(Arc::clone(&client))))
            .add_node(Arc::new(SuggestionsNode::new(Arc::clone(&client))))
            .add_node(Arc::new(ComparisonNode::new(Arc::clone(&client))))
            .add_node(Arc::new(EvaluateNode::new(client)))
            .build()?;

        Ok(Self { graph })
    }

    /// Run one analysis to completion
    ///
    /// Request validation failures surface as `Err` before any node runs;
    /// everything after that is absorbed into the returned state (run
    /// `error`, per-node failures, populated result slots).
    pub async fn analyze(&self, request: AnalysisRequest) -> trade_core::Result<AnalysisState> {
        Self::validate(&request)?;

        info!(
            code = %request.code,
            kind = request.analysis_type.map_or("none", |k| k.as_str()),
            "starting analysis"
        );

        let state = AnalysisState {
            code: request.code,
            country: request.country,
            countries: request.countries,
            analysis_type: request.analysis_type,
            ..AnalysisState::default()
        };

        Ok(self.graph.run(state).await)
    }

    /// Check per-kind required fields before touching any collaborator
    fn validate(request: &AnalysisRequest) -> trade_core::Result<()> {
        if request.code.trim().is_empty() {
            return Err(Error::Validation("code is required".to_string()));
        }

        match request.analysis_type {
            Some(AnalysisType::Risk)
                if request.country.as_deref().is_none_or(|c| c.trim().is_empty()) =>
            {
                Err(Error::Validation(
                    "country is required for risk analysis".to_string(),
                ))
            }
            Some(AnalysisType::Comparison) if request.countries.is_empty() => Err(
                Error::Validation("countries are required for comparison analysis".to_string()),
            ),
            _ => Ok(()),
        }
    }
}
