//! Error types for graph construction

use thiserror::Error;
use trade_core::NodeId;

/// Errors raised while building an analysis graph
///
/// Execution itself never raises: node failures are absorbed into the run
/// state, so the only thing that can go wrong structurally is an incomplete
/// node registry.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// A node required by the routing table was not registered
    #[error("no node registered for id: {0}")]
    MissingNode(NodeId),
}

impl From<WorkflowError> for trade_core::Error {
    fn from(err: WorkflowError) -> Self {
        trade_core::Error::Validation(format!("graph misconfigured: {err}"))
    }
}
