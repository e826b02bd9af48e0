//! Query language
//!
//! - `parser` - `field=value` mini-language to [`FilterMap`]
//! - `filter` - in-memory predicate over projected assets
//! - `xpath` - structural query synthesis
//! - `backend` - selects filter or pushdown evaluation

pub mod backend;
pub mod filter;
pub mod parser;
pub mod types;
pub mod xpath;

pub use backend::{QueryBackend, QueryPlan};
pub use parser::parse_filters;
pub use types::{Field, FilterMap};
pub use xpath::{ALL_ASSETS, build_query};
