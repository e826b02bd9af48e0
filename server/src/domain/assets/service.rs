//! Asset service
//!
//! Plans a query with the configured backend, fetches `<Asset>` nodes from
//! the source, projects them, and applies any local filters. Upstream
//! failures are logged and produce an empty result.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::data::AssetSource;
use crate::domain::query::{ALL_ASSETS, Field, FilterMap, QueryBackend};

use super::project::project_with_day_limit;
use super::types::AssetRecord;

/// Result of a query: the XPath sent upstream and the matching assets.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub xpath: String,
    pub assets: Vec<AssetRecord>,
}

/// Distinct values available for filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub tickers: Vec<String>,
    pub sectors: Vec<String>,
}

#[derive(Clone)]
pub struct AssetService {
    source: Arc<dyn AssetSource>,
    backend: QueryBackend,
    day_limit: Option<usize>,
}

impl AssetService {
    /// `day_limit` bounds the daily entries kept per asset; `None` keeps all.
    pub fn new(
        source: Arc<dyn AssetSource>,
        backend: QueryBackend,
        day_limit: Option<usize>,
    ) -> Self {
        Self {
            source,
            backend,
            day_limit,
        }
    }

    pub fn backend(&self) -> QueryBackend {
        self.backend
    }

    /// Evaluate a query-language string (or raw XPath).
    pub async fn search(&self, query: &str) -> QueryOutcome {
        let plan = self.backend.plan(query);
        tracing::debug!(
            query,
            xpath = %plan.xpath,
            local_filters = plan.filters.len(),
            "Query planned"
        );

        let records = self.fetch(&plan.xpath).await;
        let assets = plan.apply(records);
        QueryOutcome {
            xpath: plan.xpath,
            assets,
        }
    }

    /// Send an XPath upstream unchanged.
    pub async fn xpath(&self, xpath: &str) -> Vec<AssetRecord> {
        self.fetch(xpath).await
    }

    /// Every asset, filtered by exact ticker and name substring.
    pub async fn list(&self, ticker: Option<&str>, name: Option<&str>) -> Vec<AssetRecord> {
        let filters: FilterMap = [(Field::Ticker, ticker), (Field::Name, name)]
            .into_iter()
            .filter_map(|(field, value)| {
                value
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (field, v))
            })
            .collect();

        let records = self.fetch(ALL_ASSETS).await;
        crate::domain::query::filter::apply(records, &filters)
    }

    /// Sorted, de-duplicated tickers and sectors across all assets.
    pub async fn filter_options(&self) -> FilterOptions {
        let records = self.fetch(ALL_ASSETS).await;

        let mut tickers = BTreeSet::new();
        let mut sectors = BTreeSet::new();
        for record in records {
            if let Some(t) = record.ticker.filter(|t| !t.is_empty()) {
                tickers.insert(t);
            }
            if let Some(s) = record.sector.filter(|s| !s.is_empty()) {
                sectors.insert(s);
            }
        }

        FilterOptions {
            tickers: tickers.into_iter().collect(),
            sectors: sectors.into_iter().collect(),
        }
    }

    async fn fetch(&self, xpath: &str) -> Vec<AssetRecord> {
        match self.source.fetch(xpath).await {
            Ok(nodes) => nodes
                .iter()
                .map(|node| project_with_day_limit(node, self.day_limit))
                .collect(),
            Err(e) => {
                tracing::warn!(
                    source = self.source.name(),
                    xpath,
                    error = %e,
                    transient = e.is_transient(),
                    "Upstream query failed, returning no assets"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
