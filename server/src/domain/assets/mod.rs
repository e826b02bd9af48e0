//! Asset records
//!
//! - `types` - raw tree, normalized values, projected [`AssetRecord`]
//! - `normalize` - raw tree to normalized records
//! - `project` - normalized record to [`AssetRecord`]
//! - `service` - query evaluation against an asset source

pub mod normalize;
pub mod project;
pub mod service;
pub mod types;

pub use normalize::normalize;
pub use project::{SUMMARY_DAY_LIMIT, project, project_with_day_limit};
pub use service::{AssetService, FilterOptions, QueryOutcome};
pub use types::{AssetRecord, RawChild, RawNode, Record, TEXT_KEY, Value};
