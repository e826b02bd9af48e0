//! Data access layer
//!
//! - `upstream` - gRPC client for the XML service and fragment decoding
//! - `traits` - [`AssetSource`] abstraction over where assets come from
//! - `error` - [`SourceError`]

pub mod error;
pub mod traits;
pub mod upstream;

#[cfg(test)]
pub(crate) mod testing;

pub use error::SourceError;
pub use traits::AssetSource;
pub use upstream::GrpcAssetSource;
