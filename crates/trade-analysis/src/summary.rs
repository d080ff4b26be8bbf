//! Per-country summarization of raw observations
//!
//! Before handing data to the inference service, the flat per-year history
//! is collapsed into one aggregate record per country. Summaries are
//! recomputed inside each task invocation and never stored in run state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trade_core::MarketObservation;

/// Aggregate view of one country's observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,

    /// Arithmetic mean price, rounded to 2 decimal places
    pub average_price: f64,

    /// Arithmetic mean volume, rounded to 2 decimal places
    pub average_volume: f64,

    /// Price of the most recent observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_price: Option<f64>,

    /// Volume of the most recent observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_volume: Option<f64>,

    /// Number of observations behind the averages
    pub data_points: usize,
}

/// Collapse observations into one summary per distinct country
///
/// Grouping is by country name, case-sensitive. The "latest" observation is
/// the one whose date string sorts last; undated observations never win
/// unless the whole group is undated, in which case the first occurrence is
/// used. Output order follows first appearance of each country.
pub fn summarize(observations: &[MarketObservation]) -> Vec<CountrySummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&MarketObservation>> = HashMap::new();

    for obs in observations {
        let group = groups.entry(obs.country.as_str()).or_insert_with(|| {
            order.push(obs.country.as_str());
            Vec::new()
        });
        group.push(obs);
    }

    order
        .into_iter()
        .map(|country| {
            let group = &groups[country];
            let count = group.len();

            let average_price = round2(group.iter().map(|o| o.price).sum::<f64>() / count as f64);
            let average_volume = round2(group.iter().map(|o| o.volume).sum::<f64>() / count as f64);

            // Latest by date-string ordering, first occurrence as fallback.
            let latest = group
                .iter()
                .filter(|o| o.date.is_some())
                .max_by(|a, b| a.date.cmp(&b.date))
                .or_else(|| group.first())
                .copied();

            CountrySummary {
                country: country.to_string(),
                average_price,
                average_volume,
                latest_price: latest.map(|o| o.price),
                latest_volume: latest.map(|o| o.volume),
                data_points: count,
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
