//! Asset source trait
//!
//! Abstracts the upstream XML service so the asset service can be driven by
//! the gRPC client in production and by in-memory sources in tests.

use async_trait::async_trait;

use crate::data::error::SourceError;
use crate::domain::assets::RawNode;

#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Run an XPath query upstream and return the `<Asset>` nodes it yields.
    ///
    /// Fragments that are not `<Asset>` elements are skipped. A failure after
    /// some fragments arrived returns what was decoded so far.
    async fn fetch(&self, xpath: &str) -> Result<Vec<RawNode>, SourceError>;
}
