//! Task node trait definition

use async_trait::async_trait;
use trade_core::{AnalysisState, NodeId, StatePatch};

/// One unit of work in the analysis graph
///
/// A node reads from a frozen snapshot of the run state and returns a patch
/// touching only the fields it owns. Nodes never see each other's partial
/// results within a run: every member of a dispatch set receives the same
/// pre-branch snapshot.
///
/// An `Err` return is the node's absorbed failure; the engine records it
/// against the node's id instead of letting it propagate.
#[async_trait]
pub trait TaskNode: Send + Sync {
    /// The node's identity in the graph
    fn id(&self) -> NodeId;

    /// Compute this node's partial-state patch
    async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch>;
}
