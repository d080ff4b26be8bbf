//! Routing table and run phases
//!
//! The mapping from analysis kind to dispatch set is the single source of
//! truth for which analyses run together. Each primary analysis is
//! accompanied by cheaply-obtainable complementary context (a risk request
//! also surfaces market and stability signal) so one round trip yields a
//! richer result; the engine itself only consumes the static mapping.

use std::fmt;
use trade_core::{AnalysisType, NodeId};

/// Nodes to dispatch concurrently for a requested analysis kind
///
/// `None` (an unrecognized kind) dispatches nothing and the run proceeds
/// straight to evaluation.
pub fn dispatch_set(kind: Option<AnalysisType>) -> &'static [NodeId] {
    match kind {
        Some(AnalysisType::Risk) => &[NodeId::Risk, NodeId::Market, NodeId::Stability],
        Some(AnalysisType::Market) => &[NodeId::Market, NodeId::Stability, NodeId::Suggestions],
        Some(AnalysisType::Stability) => &[NodeId::Stability, NodeId::Market],
        Some(AnalysisType::Suggestions) => &[NodeId::Suggestions],
        Some(AnalysisType::Comparison) => &[NodeId::Comparison],
        None => &[],
    }
}

/// Phase of a single run, traced at each transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Start,
    Fetched,
    Dispatching,
    Merged,
    Evaluated,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Fetched => "fetched",
            Self::Dispatching => "dispatching",
            Self::Merged => "merged",
            Self::Evaluated => "evaluated",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}
