//! Structural query (XPath) builder
//!
//! Translates the query language into an XPath expression over `//Asset`
//! so the upstream service does the filtering. Raw XPath input is passed
//! through untouched.

use crate::utils::xpath::escape_literal;

use super::parser::parse_filters;
use super::types::{Field, FilterMap};

/// Expression selecting every asset
pub const ALL_ASSETS: &str = "//Asset";

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

/// Whether the input is already an XPath expression.
pub fn is_raw_xpath(query: &str) -> bool {
    let trimmed = query.trim_start();
    trimmed.starts_with('/') || trimmed.starts_with("count(")
}

/// Build the XPath for a query string.
pub fn build_query(query: &str) -> String {
    if is_raw_xpath(query) {
        return query.to_string();
    }
    build_from_filters(&parse_filters(query))
}

/// Build the XPath for already-parsed filters.
pub fn build_from_filters(filters: &FilterMap) -> String {
    let conditions: Vec<String> = filters
        .iter()
        .filter_map(|(field, value)| condition(field, value))
        .collect();

    if conditions.is_empty() {
        return ALL_ASSETS.to_string();
    }
    format!("{}[{}]", ALL_ASSETS, conditions.join(" and "))
}

fn condition(field: &Field, value: &str) -> Option<String> {
    match field {
        Field::Ticker => Some(ticker_equals(value)),
        Field::Name => Some(contains_lower("Identification/Name", value)),
        Field::Sector => Some(format!(
            "Identification/Sector='{}'",
            escape_literal(value)
        )),
        Field::MarketCap | Field::PeRatio | Field::Eps | Field::Beta => Some(format!(
            "FundamentalData/{}='{}'",
            field.as_str(),
            escape_literal(value)
        )),
        Field::FreeText => Some(free_text(value)),
        Field::Other(name) => other_field(name, value),
    }
}

/// Unrecognized field: substring match on the same-named attribute or first
/// child, the child winning when both exist. Names that are not XPath names
/// can never match a non-empty term.
fn other_field(name: &str, value: &str) -> Option<String> {
    let term = value.trim();
    if term.is_empty() {
        return None;
    }
    if !is_xml_name(name) {
        return Some("false()".to_string());
    }
    let path = format!("(@{name}|{name}[1])[last()]");
    Some(contains_lower(&path, term))
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn ticker_equals(value: &str) -> String {
    format!("@Ticker='{}'", escape_literal(value))
}

/// Case-insensitive substring via `translate`, XPath 1.0 has no `lower-case`.
fn contains_lower(path: &str, value: &str) -> String {
    format!(
        "contains(translate({}, '{}', '{}'), '{}')",
        path,
        UPPER,
        LOWER,
        escape_literal(&value.to_lowercase())
    )
}

fn free_text(term: &str) -> String {
    let term = term.trim();
    format!(
        "({} or {} or {})",
        ticker_equals(&term.to_uppercase()),
        contains_lower("Identification/Name", term),
        contains_lower("Identification/Sector", term)
    )
}
