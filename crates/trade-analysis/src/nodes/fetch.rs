//! Data-fetch node

use crate::source::MarketDataSource;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use trade_core::{AnalysisState, NodeId, StatePatch};
use trade_workflow::TaskNode;

/// Loads raw observations for the requested code
///
/// Runs first in every analysis; a failure here sets the run-terminal
/// error and short-circuits all task dispatch.
pub struct FetchNode {
    source: Arc<dyn MarketDataSource>,
}

impl FetchNode {
    /// Create a new fetch node over an injected data source
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl TaskNode for FetchNode {
    fn id(&self) -> NodeId {
        NodeId::Fetch
    }

    async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch> {
        let rows = self.source.fetch_observations(&state.code).await?;
        debug!(code = %state.code, rows = rows.len(), "fetched market data");
        Ok(StatePatch::with_market_data(rows))
    }
}
