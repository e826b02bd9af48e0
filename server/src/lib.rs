//! AssetLens server
//!
//! HTTP front end over an XML asset service: a small query language is
//! parsed into filters, evaluated locally or pushed upstream as XPath, and
//! matching assets are returned as flattened JSON records.

pub mod api;
pub mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
