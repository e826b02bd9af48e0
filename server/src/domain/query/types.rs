//! Query filter types

use std::fmt;

use serde::{Serialize, Serializer};

/// Reserved key for free-text search across ticker and name
pub const FREE_SEARCH_KEY: &str = "_freeSearch";

/// Canonical, alias-resolved field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Ticker,
    Name,
    Sector,
    MarketCap,
    PeRatio,
    Eps,
    Beta,
    /// Unrecognized field name, original case preserved
    Other(String),
    /// Free-text search (reserved key)
    FreeText,
}

impl Field {
    /// Resolve a user-supplied field name (case-insensitive aliases).
    pub fn canonicalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "symbol" | "ticker" => Self::Ticker,
            "name" | "nome" => Self::Name,
            "sector" | "setor" => Self::Sector,
            "marketcap" | "cap" => Self::MarketCap,
            "pe" | "peratio" => Self::PeRatio,
            "eps" => Self::Eps,
            "beta" => Self::Beta,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ticker => "Ticker",
            Self::Name => "Name",
            Self::Sector => "Sector",
            Self::MarketCap => "MarketCap",
            Self::PeRatio => "PERatio",
            Self::Eps => "EPS",
            Self::Beta => "Beta",
            Self::Other(name) => name,
            Self::FreeText => FREE_SEARCH_KEY,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed filters: canonical field to value, in parse order.
///
/// The first value written for a field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMap {
    entries: Vec<(Field, String)>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the field is already set. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.contains(&field) {
            return false;
        }
        self.entries.push((field, value.into()));
        true
    }

    pub fn get(&self, field: &Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, field: &Field) -> bool {
        self.entries.iter().any(|(f, _)| f == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &str)> {
        self.entries.iter().map(|(f, v)| (f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Free-text term, when the query had no structured filter
    pub fn free_text(&self) -> Option<&str> {
        self.get(&Field::FreeText)
    }
}

impl<F: Into<String>> FromIterator<(Field, F)> for FilterMap {
    fn from_iter<I: IntoIterator<Item = (Field, F)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, value) in iter {
            map.insert_if_absent(field, value);
        }
        map
    }
}

impl Serialize for FilterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(f, v)| (f.as_str(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_aliases() {
        assert_eq!(Field::canonicalize("symbol"), Field::Ticker);
        assert_eq!(Field::canonicalize("TICKER"), Field::Ticker);
        assert_eq!(Field::canonicalize("nome"), Field::Name);
        assert_eq!(Field::canonicalize("Name"), Field::Name);
        assert_eq!(Field::canonicalize("setor"), Field::Sector);
        assert_eq!(Field::canonicalize("cap"), Field::MarketCap);
        assert_eq!(Field::canonicalize("MarketCap"), Field::MarketCap);
        assert_eq!(Field::canonicalize("pe"), Field::PeRatio);
        assert_eq!(Field::canonicalize("EPS"), Field::Eps);
        assert_eq!(Field::canonicalize("beta"), Field::Beta);
    }

    #[test]
    fn test_canonicalize_unknown_keeps_case() {
        assert_eq!(
            Field::canonicalize("Exchange"),
            Field::Other("Exchange".to_string())
        );
        assert_eq!(Field::canonicalize("Exchange").as_str(), "Exchange");
    }

    #[test]
    fn test_first_writer_wins() {
        let mut map = FilterMap::new();
        assert!(map.insert_if_absent(Field::Ticker, "NVDA"));
        assert!(!map.insert_if_absent(Field::Ticker, "AAPL"));
        assert_eq!(map.get(&Field::Ticker), Some("NVDA"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_serialize_as_object() {
        let map: FilterMap = [(Field::Ticker, "NVDA"), (Field::FreeText, "x")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"Ticker": "NVDA", "_freeSearch": "x"}));
    }
}
