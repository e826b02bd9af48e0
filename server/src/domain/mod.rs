//! Domain logic
//!
//! - `assets` - XML tree normalization, asset projection, asset service
//! - `query` - query language parsing, predicate filtering, XPath synthesis

pub mod assets;
pub mod query;

pub use assets::AssetService;
pub use query::QueryBackend;
