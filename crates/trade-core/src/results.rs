//! Structured analysis result payloads
//!
//! Each type mirrors the JSON shape the inference service is instructed to
//! return, plus any chart series synthesized locally from raw observations.
//! Exactly one task node writes each of these into the analysis state.

use serde::{Deserialize, Serialize};

/// Country-specific risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// Overall risk score, 0-100
    pub risk_score: f64,

    /// Key risk factors identified by the model
    pub risk_factors: Vec<String>,

    /// Narrative summary of findings
    pub summary: String,

    /// Per-observation series, sorted ascending by year
    #[serde(default)]
    pub chart_data: Vec<RiskChartPoint>,
}

/// One point of the risk chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskChartPoint {
    /// Period label taken from the observation date
    pub month: String,
    /// Synthesized per-observation risk metric, 0-100
    pub risk: f64,
    pub volume: f64,
    pub price: f64,
}

/// Top markets ranked by margin and growth potential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub best_markets: Vec<BestMarket>,

    /// One bar per returned market, volume looked up from raw observations
    #[serde(default)]
    pub chart_data: Vec<MarketChartPoint>,
}

/// One market entry returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMarket {
    pub country: String,
    pub margin: f64,
    pub potential: String,
}

/// One point of the best-markets chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketChartPoint {
    pub country: String,
    pub margin: f64,
    pub volume: f64,
}

/// Trading-partner stability assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityAnalysis {
    pub partners: Vec<TradingPartner>,
    #[serde(default)]
    pub summary: String,
}

/// One partner entry; zero-stability entries are filtered out as noise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPartner {
    pub country: String,
    #[serde(default)]
    pub stability_index: f64,
    #[serde(default)]
    pub reliability: String,
}

/// Expand/reduce recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartSuggestions {
    pub expand_markets: Vec<String>,
    pub reduce_exposure: Vec<String>,
    pub reasoning: String,
}

/// Side-by-side comparison of the requested countries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryComparison {
    pub countries: Vec<ComparedCountry>,
    pub recommendation: String,
}

/// One compared country with its metric block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedCountry {
    pub name: String,
    pub metrics: CountryMetrics,
}

/// Metrics the model fills per compared country
///
/// Price and volume are echoed from the supplied summaries; risk and
/// stability are model estimates on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMetrics {
    pub price: f64,
    pub volume: f64,
    pub risk: f64,
    pub stability: f64,
}
