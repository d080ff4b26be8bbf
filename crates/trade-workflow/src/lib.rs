//! Workflow graph engine for trade-rs
//!
//! This crate executes one analysis run as a small directed graph: a fetch
//! node, a typed routing decision, a concurrent fan-out over independent
//! task nodes, a conflict-free merge of their partial-state patches, and a
//! single terminal evaluation step.

pub mod error;
pub mod graph;
pub mod node;
pub mod route;

pub use error::WorkflowError;
pub use graph::{AnalysisGraph, GraphBuilder};
pub use node::TaskNode;
pub use route::{RunPhase, dispatch_set};
