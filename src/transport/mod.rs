pub mod http;
use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

pub use http::HttpTransport;

/// HTTP method for a schema API call. The managed-schema API only ever needs
/// these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

/// Details about the connection a request went over, for callers that want to
/// log or inspect them. The schema client itself ignores this.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// The fully resolved URL the request was sent to.
    pub url: String,
    /// HTTP status code of the response.
    pub status: u16,
}

/// The injected wire capability the schema client talks through.
///
/// `endpoint` is a path relative to the collection (e.g. `schema/fields`),
/// `data` an already-serialized JSON body for POSTs. Implementations own all
/// connection handling, auth, and timeout policy.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_request(
        &self,
        method: RequestMethod,
        endpoint: &str,
        collection: &str,
        data: Option<String>
    ) -> Result<(Value, ConnectionInfo), TransportError>;
}
