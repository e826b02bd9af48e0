//! gRPC asset source
//!
//! Streams `GetQueryResult` fragments from the XML service and decodes each
//! one as it arrives.

use std::time::Duration;

use async_trait::async_trait;
use tokio_stream::StreamExt;
use tonic::transport::Endpoint;

use super::proto::{Query, XmlQueryClient};
use super::xml::decode_asset;
use crate::core::config::UpstreamConfig;
use crate::data::error::SourceError;
use crate::data::traits::AssetSource;
use crate::domain::assets::RawNode;

pub struct GrpcAssetSource {
    client: XmlQueryClient,
    url: String,
    timeout: Duration,
}

impl GrpcAssetSource {
    /// Build the source without connecting; the channel connects on first use.
    pub fn connect_lazy(config: &UpstreamConfig) -> Result<Self, SourceError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let endpoint = Endpoint::from_shared(config.url.clone())
            .map_err(|e| SourceError::InvalidEndpoint {
                url: config.url.clone(),
                reason: e.to_string(),
            })?
            .connect_timeout(timeout);

        tracing::debug!(url = %config.url, timeout_secs = config.timeout_secs, "Upstream channel configured");

        Ok(Self {
            client: XmlQueryClient::new(endpoint.connect_lazy()),
            url: config.url.clone(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn stream_assets(&self, xpath: &str) -> Result<Vec<RawNode>, SourceError> {
        let mut client = self.client.clone();
        let request = Query {
            query_string: xpath.to_string(),
        };
        let mut stream = client.get_query_result(request).await?.into_inner();

        let mut nodes = Vec::new();
        let mut skipped = 0usize;
        while let Some(item) = stream.next().await {
            match item {
                Ok(message) => match decode_asset(&message.result) {
                    Ok(Some(node)) => nodes.push(node),
                    Ok(None) => skipped += 1,
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping undecodable fragment");
                        skipped += 1;
                    }
                },
                Err(status) if nodes.is_empty() => return Err(status.into()),
                Err(status) => {
                    tracing::warn!(
                        error = %status,
                        received = nodes.len(),
                        "Upstream stream failed, returning partial results"
                    );
                    break;
                }
            }
        }

        tracing::debug!(xpath, count = nodes.len(), skipped, "Upstream query complete");
        Ok(nodes)
    }
}

#[async_trait]
impl AssetSource for GrpcAssetSource {
    fn name(&self) -> &'static str {
        "grpc"
    }

    async fn fetch(&self, xpath: &str) -> Result<Vec<RawNode>, SourceError> {
        tokio::time::timeout(self.timeout, self.stream_assets(xpath))
            .await
            .map_err(|_| SourceError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> UpstreamConfig {
        UpstreamConfig {
            url: url.to_string(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = GrpcAssetSource::connect_lazy(&config("not a url"))
            .err()
            .expect("invalid url must fail");
        assert!(matches!(err, SourceError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn test_lazy_connect_does_not_dial() {
        let source = GrpcAssetSource::connect_lazy(&config("http://127.0.0.1:1")).unwrap();
        assert_eq!(source.url(), "http://127.0.0.1:1");
        assert_eq!(source.name(), "grpc");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_errors() {
        let source = GrpcAssetSource::connect_lazy(&config("http://127.0.0.1:1")).unwrap();
        assert!(source.fetch("//Asset").await.is_err());
    }
}
