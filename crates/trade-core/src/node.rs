//! Typed node identifiers for the workflow graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a task node in the analysis graph
///
/// The set is closed: routing tables map analysis kinds to static slices of
/// these identifiers, so a typo can never route to a nonexistent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    /// Load raw observations for the requested code
    Fetch,
    /// Country-specific risk scoring
    Risk,
    /// Best-market discovery
    Market,
    /// Partner-stability scoring
    Stability,
    /// Strategic expand/reduce suggestions
    Suggestions,
    /// Multi-country comparison
    Comparison,
    /// Terminal self-check over populated result slots
    Evaluate,
}

impl NodeId {
    /// Stable snake_case name, used in logs and failure reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Risk => "risk",
            Self::Market => "market",
            Self::Stability => "stability",
            Self::Suggestions => "suggestions",
            Self::Comparison => "comparison",
            Self::Evaluate => "evaluate",
        }
    }

    /// Prefix used when reporting this node's absorbed failure
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Self::Fetch => "data fetch failed",
            Self::Risk => "risk analysis failed",
            Self::Market => "market analysis failed",
            Self::Stability => "stability analysis failed",
            Self::Suggestions => "smart suggestions failed",
            Self::Comparison => "country comparison failed",
            Self::Evaluate => "evaluation failed",
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
