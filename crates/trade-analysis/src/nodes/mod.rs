//! Task nodes of the analysis graph
//!
//! Each node is an independently invokable unit of work: it reads a frozen
//! state snapshot, does its own I/O (data fetch or inference call), and
//! returns a patch touching only the result slot it owns.

mod comparison;
mod evaluate;
mod fetch;
mod market;
mod risk;
mod stability;
mod suggestions;

pub use comparison::ComparisonNode;
pub use evaluate::EvaluateNode;
pub use fetch::FetchNode;
pub use market::MarketNode;
pub use risk::RiskNode;
pub use stability::StabilityNode;
pub use suggestions::SuggestionsNode;

use serde::Serialize;
use serde::de::DeserializeOwned;
use trade_core::Error;

/// Serialize prompt data; a failure here is a programming error surfaced
/// as a payload fault rather than a panic
pub(crate) fn to_prompt_json<T: Serialize>(value: &T) -> trade_core::Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Payload(e.to_string()))
}

/// Deserialize an extracted JSON value into the node's expected shape
pub(crate) fn parse_payload<T: DeserializeOwned>(
    value: serde_json::Value,
) -> trade_core::Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Payload(e.to_string()))
}
