//! Per-run analysis state and partial-state patches
//!
//! One [`AnalysisState`] instance exists per run. It is created from the
//! caller's request, mutated only by folding in [`StatePatch`] values
//! returned from task nodes, and discarded once the response is returned.

use crate::node::NodeId;
use crate::observation::MarketObservation;
use crate::results::{
    CountryComparison, MarketAnalysis, RiskAnalysis, SmartSuggestions, StabilityAnalysis,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The closed set of analysis kinds a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Country-specific risk scoring (requires a country)
    Risk,
    /// Best-market discovery
    Market,
    /// Partner-stability scoring
    Stability,
    /// Strategic expand/reduce suggestions
    Suggestions,
    /// Multi-country comparison (requires a country list)
    Comparison,
}

impl AnalysisType {
    /// Stable lowercase name, matching the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Risk => "risk",
            Self::Market => "market",
            Self::Stability => "stability",
            Self::Suggestions => "suggestions",
            Self::Comparison => "comparison",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = UnknownAnalysisType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "risk" => Ok(Self::Risk),
            "market" => Ok(Self::Market),
            "stability" => Ok(Self::Stability),
            "suggestions" => Ok(Self::Suggestions),
            "comparison" => Ok(Self::Comparison),
            other => Err(UnknownAnalysisType(other.to_string())),
        }
    }
}

/// Returned when a wire string does not name a known analysis kind
///
/// Callers decide whether this is a hard error or a no-op run; the state
/// itself carries `None` and routes straight to evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown analysis type: {0}")]
pub struct UnknownAnalysisType(pub String);

/// The single mutable record threaded through a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisState {
    /// Product classification code being analyzed
    pub code: String,

    /// Single target country, required only for risk analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Ordered country list, required only for comparison
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,

    /// Requested analysis kind; `None` routes straight to evaluation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<AnalysisType>,

    /// Raw observations, populated once by the fetch node
    #[serde(default)]
    pub market_data: Vec<MarketObservation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_analysis: Option<RiskAnalysis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_analysis: Option<MarketAnalysis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability_analysis: Option<StabilityAnalysis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_suggestions: Option<SmartSuggestions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_comparison: Option<CountryComparison>,

    /// Run-terminal failure; once set, no new fan-out is dispatched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Per-branch failures, keyed by the node that failed
    ///
    /// A populated entry means "this section of the result is absent
    /// because its node failed", independent of sibling results.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_failures: BTreeMap<NodeId, String>,
}

impl AnalysisState {
    /// Fold a node's patch into the state
    ///
    /// Patches from one fan-out touch disjoint fields by construction; if
    /// two patches ever wrote the same slot, the later-applied one wins.
    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(data) = patch.market_data {
            self.market_data = data;
        }
        if let Some(risk) = patch.risk_analysis {
            self.risk_analysis = Some(risk);
        }
        if let Some(market) = patch.market_analysis {
            self.market_analysis = Some(market);
        }
        if let Some(stability) = patch.stability_analysis {
            self.stability_analysis = Some(stability);
        }
        if let Some(suggestions) = patch.smart_suggestions {
            self.smart_suggestions = Some(suggestions);
        }
        if let Some(comparison) = patch.country_comparison {
            self.country_comparison = Some(comparison);
        }
        if let Some(error) = patch.error {
            self.error = Some(error);
        }
    }

    /// Record a per-branch node failure
    pub fn record_failure(&mut self, node: NodeId, message: impl Into<String>) {
        self.node_failures.insert(node, message.into());
    }

    /// Whether the run as a whole failed (data could not be fetched)
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Partial state update returned by one task node
///
/// Each node sets at most the fields it owns; everything else stays `None`
/// so folding patches from concurrent branches never drops sibling writes.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub market_data: Option<Vec<MarketObservation>>,
    pub risk_analysis: Option<RiskAnalysis>,
    pub market_analysis: Option<MarketAnalysis>,
    pub stability_analysis: Option<StabilityAnalysis>,
    pub smart_suggestions: Option<SmartSuggestions>,
    pub country_comparison: Option<CountryComparison>,
    pub error: Option<String>,
}

impl StatePatch {
    /// A patch that changes nothing (the evaluate node's normal output)
    pub fn empty() -> Self {
        Self::default()
    }

    /// A patch carrying fetched observations
    pub fn with_market_data(data: Vec<MarketObservation>) -> Self {
        Self {
            market_data: Some(data),
            ..Self::default()
        }
    }

    /// A patch carrying a run-terminal error
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
