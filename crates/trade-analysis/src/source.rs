//! Market-data source boundary
//!
//! The persistent store stays external: the engine only depends on this
//! trait and receives an implementation at construction time. Contract: an
//! unknown code yields an empty row list, never an error; errors are
//! reserved for transport-level failure.

use async_trait::async_trait;
use std::collections::HashMap;
use trade_core::{Error, MarketObservation};

/// Data-retrieval collaborator
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch all shaped observation rows for a product classification code
    async fn fetch_observations(&self, code: &str) -> trade_core::Result<Vec<MarketObservation>>;
}

/// In-memory source over already-shaped rows
///
/// Backs the CLI (rows loaded from a file) and tests. Rows are grouped by
/// code once at construction.
#[derive(Debug, Default, Clone)]
pub struct StaticMarketData {
    rows: HashMap<String, Vec<MarketObservation>>,
}

impl StaticMarketData {
    /// Build a source from a flat row list, grouping by code
    pub fn from_rows(rows: Vec<MarketObservation>) -> Self {
        let mut grouped: HashMap<String, Vec<MarketObservation>> = HashMap::new();
        for row in rows {
            grouped.entry(row.code.clone()).or_default().push(row);
        }
        Self { rows: grouped }
    }

    /// Number of distinct codes available
    pub fn code_count(&self) -> usize {
        self.rows.len()
    }
}

#[async_trait]
impl MarketDataSource for StaticMarketData {
    async fn fetch_observations(&self, code: &str) -> trade_core::Result<Vec<MarketObservation>> {
        Ok(self.rows.get(code).cloned().unwrap_or_default())
    }
}

/// A source that always fails at the transport level
///
/// Stands in for an unreachable store when exercising the engine's
/// short-circuit path.
#[derive(Debug, Clone)]
pub struct UnreachableSource;

#[async_trait]
impl MarketDataSource for UnreachableSource {
    async fn fetch_observations(&self, _code: &str) -> trade_core::Result<Vec<MarketObservation>> {
        Err(Error::Fetch("store unreachable".to_string()))
    }
}
