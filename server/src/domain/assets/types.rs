//! Asset data types
//!
//! Shapes flowing through the asset pipeline:
//! - [`RawNode`] / [`RawChild`] - parsed XML tree (input, produced by the fragment decoder)
//! - [`Value`] / [`Record`] - normalized tree (tagged union, no dynamic typing)
//! - [`AssetRecord`] - fixed-shape projection served to API callers

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Field name used for a node's own text when it also carries attributes or children
pub const TEXT_KEY: &str = "_";

// ============================================================================
// RAW TREE
// ============================================================================

/// A parsed XML element.
///
/// Children are grouped by element name; each group keeps document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNode {
    pub attributes: BTreeMap<String, String>,
    pub children: BTreeMap<String, Vec<RawChild>>,
    pub text: Option<String>,
}

/// One entry of a named child group.
///
/// Elements with neither attributes nor child elements are represented as
/// plain text, everything else as a nested node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawChild {
    Text(String),
    Node(RawNode),
}

impl RawNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: append a text child
    pub fn with_text_child(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.push_child(name, RawChild::Text(text.into()));
        self
    }

    /// Builder: append a node child
    pub fn with_node_child(mut self, name: impl Into<String>, node: RawNode) -> Self {
        self.push_child(name, RawChild::Node(node));
        self
    }

    /// Builder: set direct text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn push_child(&mut self, name: impl Into<String>, child: RawChild) {
        self.children.entry(name.into()).or_default().push(child);
    }
}

// ============================================================================
// NORMALIZED TREE
// ============================================================================

/// Normalized record: field name to value
pub type Record = BTreeMap<String, Value>;

/// A normalized value.
///
/// Serializes untagged so records render as plain JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Record(Record),
    List(Vec<Value>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Text used for comparisons.
    ///
    /// Lists compare through their first element; records have no scalar form.
    pub fn comparable_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(items) => items.first().and_then(Value::comparable_text),
            Self::Record(_) => None,
        }
    }
}

// ============================================================================
// PROJECTION
// ============================================================================

/// Flat asset record with the detail sections kept alongside.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct AssetRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    // Fundamental data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<String>,
    #[serde(rename = "PERatio", skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<String>,
    #[serde(rename = "EPS", skip_serializing_if = "Option::is_none")]
    pub eps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_close: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<String>,

    // Indicators
    #[serde(rename = "PriceSMA", skip_serializing_if = "Option::is_none")]
    pub price_sma: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_volume: Option<String>,

    /// Closing prices of the retained days, in document order
    pub prices: Vec<String>,
    /// Volumes of the retained days, in document order
    pub volumes: Vec<String>,

    #[schema(value_type = Object)]
    pub identification: Record,
    #[schema(value_type = Object)]
    pub fundamental_data: Record,
    #[schema(value_type = Object)]
    pub indicators: Record,
    #[schema(value_type = Vec<Object>)]
    pub daily_data: Vec<Value>,

    /// Full normalized record
    #[serde(rename = "raw")]
    #[schema(value_type = Object)]
    pub raw: Record,
}
