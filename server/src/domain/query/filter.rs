//! In-memory predicate filter over projected assets

use crate::domain::assets::{AssetRecord, Value};

use super::types::{Field, FilterMap};

/// Keep the records matching every filter, in input order.
pub fn apply(records: Vec<AssetRecord>, filters: &FilterMap) -> Vec<AssetRecord> {
    if filters.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| matches(record, filters))
        .collect()
}

/// Whether a single record satisfies all filters (logical AND).
pub fn matches(record: &AssetRecord, filters: &FilterMap) -> bool {
    filters
        .iter()
        .all(|(field, value)| matches_field(record, field, value))
}

fn matches_field(record: &AssetRecord, field: &Field, value: &str) -> bool {
    let needle = value.trim().to_lowercase();
    match field {
        Field::Ticker => normalized(record.ticker.as_deref()) == needle,
        Field::FreeText => {
            normalized(record.ticker.as_deref()).contains(&needle)
                || normalized(record.name.as_deref()).contains(&needle)
        }
        _ => normalized(field_value(record, field)).contains(&needle),
    }
}

/// Comparable text of a field; `None` when the record has no such value.
fn field_value<'a>(record: &'a AssetRecord, field: &Field) -> Option<&'a str> {
    match field {
        Field::Ticker => record.ticker.as_deref(),
        Field::Name => record.name.as_deref(),
        Field::Sector => record.sector.as_deref(),
        Field::MarketCap => record.market_cap.as_deref(),
        Field::PeRatio => record.pe_ratio.as_deref(),
        Field::Eps => record.eps.as_deref(),
        Field::Beta => record.beta.as_deref(),
        Field::Other(name) => record.raw.get(name).and_then(Value::comparable_text),
        Field::FreeText => None,
    }
}

// Missing values compare as ""
fn normalized(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_lowercase()
}
