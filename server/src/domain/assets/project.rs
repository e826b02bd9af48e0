//! Asset projection
//!
//! Maps a normalized `<Asset>` node onto [`AssetRecord`]. Expected layout:
//!
//! ```text
//! <Asset Ticker="AAPL">
//!   <Identification><Name/><Sector/></Identification>
//!   <FundamentalData><MarketCap/><PERatio/><EPS/><OpenPrice/><PrevClose/><Beta/></FundamentalData>
//!   <Indicators><PriceSMA/><AverageVolume/></Indicators>
//!   <DailyData><Day index="1"><ClosingPrice Currency="EUR"/><Volume/></Day>...</DailyData>
//! </Asset>
//! ```
//!
//! Every lookup is optional; missing sections project to empty values.

use super::normalize::normalize;
use super::types::{AssetRecord, RawNode, Record, TEXT_KEY, Value};

/// Number of daily entries kept by the summary projection
pub const SUMMARY_DAY_LIMIT: usize = 10;

/// Project with the summary day limit.
pub fn project(node: &RawNode) -> AssetRecord {
    project_with_day_limit(node, Some(SUMMARY_DAY_LIMIT))
}

/// Project keeping at most `day_limit` daily entries (`None` keeps all).
pub fn project_with_day_limit(node: &RawNode, day_limit: Option<usize>) -> AssetRecord {
    let raw = normalize(node);

    let identification = section(&raw, "Identification");
    let fundamental_data = section(&raw, "FundamentalData");
    let indicators = section(&raw, "Indicators");

    let mut daily_data = days(&raw);
    if let Some(limit) = day_limit {
        daily_data.truncate(limit);
    }

    let prices = daily_data
        .iter()
        .filter_map(|day| day.as_record().and_then(closing_price))
        .collect();
    let volumes = daily_data
        .iter()
        .filter_map(|day| day.as_record().and_then(|d| text(d, "Volume")))
        .collect();

    AssetRecord {
        ticker: text(&raw, "Ticker"),
        name: text(&identification, "Name"),
        sector: text(&identification, "Sector"),
        market_cap: text(&fundamental_data, "MarketCap"),
        pe_ratio: text(&fundamental_data, "PERatio"),
        eps: text(&fundamental_data, "EPS"),
        open_price: text(&fundamental_data, "OpenPrice"),
        prev_close: text(&fundamental_data, "PrevClose"),
        beta: text(&fundamental_data, "Beta"),
        price_sma: text(&indicators, "PriceSMA"),
        average_volume: text(&indicators, "AverageVolume"),
        prices,
        volumes,
        identification,
        fundamental_data,
        indicators,
        daily_data,
        raw,
    }
}

fn section(record: &Record, key: &str) -> Record {
    record
        .get(key)
        .and_then(Value::as_record)
        .cloned()
        .unwrap_or_default()
}

// Repeated fields project through their first entry
fn text(record: &Record, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::comparable_text)
        .map(str::to_string)
}

/// `DailyData/Day` as a list; a single day collapses to a record during
/// normalization and is wrapped back here.
fn days(raw: &Record) -> Vec<Value> {
    match raw
        .get("DailyData")
        .and_then(Value::as_record)
        .and_then(|d| d.get("Day"))
    {
        Some(Value::List(items)) => items.clone(),
        Some(day) => vec![day.clone()],
        None => Vec::new(),
    }
}

/// Closing price is plain text, or a record with a currency attribute
fn closing_price(day: &Record) -> Option<String> {
    match day.get("ClosingPrice")? {
        Value::Text(s) => Some(s.clone()),
        Value::Record(r) => text(r, TEXT_KEY),
        Value::List(_) => None,
    }
}
