//! Query backend selection
//!
//! One parser, two ways of evaluating its output:
//! - [`QueryBackend::Predicate`] fetches every asset and filters in memory
//! - [`QueryBackend::Structural`] pushes the filters into the upstream XPath
//!
//! Raw XPath input bypasses both and is sent upstream verbatim.

use crate::core::config::QueryMode;
use crate::domain::assets::AssetRecord;

use super::filter;
use super::parser::parse_filters;
use super::types::FilterMap;
use super::xpath::{ALL_ASSETS, build_from_filters, is_raw_xpath};

/// How a query string will be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// XPath sent to the upstream service
    pub xpath: String,
    /// Filters applied locally to the projected records
    pub filters: FilterMap,
}

impl QueryPlan {
    /// Plan that sends `xpath` upstream and keeps every result.
    pub fn passthrough(xpath: impl Into<String>) -> Self {
        Self {
            xpath: xpath.into(),
            filters: FilterMap::new(),
        }
    }

    /// Apply the local filters.
    pub fn apply(&self, records: Vec<AssetRecord>) -> Vec<AssetRecord> {
        filter::apply(records, &self.filters)
    }
}

/// Query evaluation strategy, chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryBackend {
    Predicate,
    Structural,
}

impl QueryBackend {
    pub fn from_mode(mode: QueryMode) -> Self {
        match mode {
            QueryMode::Filter => Self::Predicate,
            QueryMode::Pushdown => Self::Structural,
        }
    }

    pub fn mode(&self) -> QueryMode {
        match self {
            Self::Predicate => QueryMode::Filter,
            Self::Structural => QueryMode::Pushdown,
        }
    }

    /// Plan the evaluation of a query string.
    pub fn plan(&self, query: &str) -> QueryPlan {
        if is_raw_xpath(query) {
            return QueryPlan::passthrough(query);
        }

        let filters = parse_filters(query);
        match self {
            Self::Predicate => QueryPlan {
                xpath: ALL_ASSETS.to_string(),
                filters,
            },
            Self::Structural => QueryPlan::passthrough(build_from_filters(&filters)),
        }
    }
}
