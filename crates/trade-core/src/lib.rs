//! Core data model for trade-rs
//!
//! This crate defines the types shared by the workflow engine and the
//! analysis layer: raw market observations, the per-run analysis state,
//! partial-state patches, typed analysis kinds and node identifiers, and
//! the structured result payloads.

pub mod error;
pub mod node;
pub mod observation;
pub mod results;
pub mod state;

pub use error::{Error, Result};
pub use node::NodeId;
pub use observation::MarketObservation;
pub use results::{
    BestMarket, ComparedCountry, CountryComparison, CountryMetrics, MarketAnalysis,
    MarketChartPoint, RiskAnalysis, RiskChartPoint, SmartSuggestions, StabilityAnalysis,
    TradingPartner,
};
pub use state::{AnalysisState, AnalysisType, StatePatch, UnknownAnalysisType};
