//! Upstream XML service
//!
//! - `proto` - `bi_request.XmlQueryService` messages and client
//! - `grpc` - [`GrpcAssetSource`], the production [`AssetSource`](crate::data::AssetSource)
//! - `xml` - fragment decoding into raw trees

pub mod grpc;
pub mod proto;
pub mod xml;

pub use grpc::GrpcAssetSource;
