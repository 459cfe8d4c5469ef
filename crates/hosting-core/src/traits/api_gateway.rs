// # API Gateway Trait
//
// Defines the transport seam between the record engine and the provider's
// REST API.
//
// ## Implementations
//
// - HTTP: `hosting-gateway-http` crate (reqwest)
// - Tests: recording mock in `tests/common/mod.rs`
//
// ## Usage
//
// ```rust,ignore
// use hosting_core::traits::{ApiGateway, HttpMethod};
//
// async fn list(gateway: &dyn ApiGateway) -> hosting_core::Result<serde_json::Value> {
//     gateway.request(HttpMethod::Get, "/domains", None).await
// }
// ```

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// HTTP methods used by the provider API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read
    Get,
    /// Create
    Post,
    /// Replace
    Put,
    /// Remove
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the method mutates provider state
    pub fn is_write(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for provider API transports
///
/// A gateway appends `path` to its configured base URL, attaches the
/// authentication headers derived from [`crate::ApiConfig`] and unwraps the
/// provider's `{"data": ...}` envelope.
///
/// # Failure Semantics
///
/// - Any transport failure or non-2xx status is returned as
///   [`crate::Error::ApiRequestFailed`]
/// - No retries. The first failure aborts the whole operation
/// - No caching between requests
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Issue a single request
    ///
    /// # Parameters
    ///
    /// - `method`: HTTP method
    /// - `path`: API path, e.g. `/domains/example.com/dns`
    /// - `body`: JSON body for write methods
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: The `data` field of the response envelope (`Null` when absent)
    /// - `Err(Error)`: If the request failed
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, crate::Error>;

    /// Get the gateway name (for logging/debugging)
    fn gateway_name(&self) -> &'static str;
}
