//! `bi_request` protocol messages and client
//!
//! ```text
//! service XmlQueryService {
//!   rpc GetQueryResult (Query) returns (stream QueryResult);
//! }
//! message Query       { string query_string = 1; }
//! message QueryResult { string result = 1; }
//! ```

use tonic::codec::{ProstCodec, Streaming};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

const GET_QUERY_RESULT_PATH: &str = "/bi_request.XmlQueryService/GetQueryResult";

#[derive(Clone, PartialEq, prost::Message)]
pub struct Query {
    /// XPath expression evaluated against the stored documents
    #[prost(string, tag = "1")]
    pub query_string: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryResult {
    /// One matching XML fragment
    #[prost(string, tag = "1")]
    pub result: String,
}

/// Client for `bi_request.XmlQueryService`.
#[derive(Debug, Clone)]
pub struct XmlQueryClient {
    inner: tonic::client::Grpc<Channel>,
}

impl XmlQueryClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Server-streaming `GetQueryResult`.
    pub async fn get_query_result(
        &mut self,
        request: impl tonic::IntoRequest<Query>,
    ) -> Result<tonic::Response<Streaming<QueryResult>>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unavailable(format!("Service was not ready: {}", e)))?;

        let codec: ProstCodec<Query, QueryResult> = ProstCodec::default();
        let path = PathAndQuery::from_static(GET_QUERY_RESULT_PATH);
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }
}
