//! Raw market observation rows

use serde::{Deserialize, Serialize};

/// One dated price/volume record for one country, keyed by HSN code
///
/// Observations are produced once by the data-retrieval collaborator and are
/// read-only for the rest of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    /// Product classification (HSN) code this row belongs to
    pub code: String,

    /// Country the observation was recorded for
    pub country: String,

    /// Unit price for the period
    pub price: f64,

    /// Traded volume for the period
    pub volume: f64,

    /// Period label, typically a year string ("2021"); may be absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl MarketObservation {
    /// Create a new observation
    pub fn new(
        code: impl Into<String>,
        country: impl Into<String>,
        price: f64,
        volume: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            country: country.into(),
            price,
            volume,
            date: Some(date.into()),
        }
    }

    /// Numeric year parsed from the leading date segment, if any
    ///
    /// Dates are stored as strings ("2021" or "2021-03"); rows without a
    /// parsable year sort first in year-ordered chart series.
    pub fn year(&self) -> Option<i32> {
        self.date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.trim().parse().ok())
    }
}
