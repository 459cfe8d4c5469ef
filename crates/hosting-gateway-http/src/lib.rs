// # HTTP API Gateway
//
// This crate provides the reqwest-backed `ApiGateway` for the hosting
// DNS-management API.
//
// ## Behavior
//
// - One HTTP request per `request()` call
// - Any transport error or non-2xx status becomes `Error::ApiRequestFailed`
// - HTTP timeout configured (30 seconds)
// - Unwraps the provider's `{"data": ...}` envelope
// - Dry-run mode: GETs are sent, writes are only logged
// - NO retry logic, NO caching
//
// ## Security Requirements
//
// - API token NEVER appears in logs
// - API token NEVER appears in error messages
//
// ## API Reference
//
// - List domains: GET `/domains`
// - Get domain: GET `/domains/:domain`
// - List records: GET `/domains/:domain/dns`
// - Add records: POST `/domains/:domain/dns` `[{name, type, content, ttl, prio}]`
// - Update records: PUT `/domains/:domain/dns` `[{id, name, type, content, ttl, prio}]`
// - Delete records: DELETE `/domains/:domain/dns` `[{id}]`

use async_trait::async_trait;
use hosting_core::traits::{ApiGateway, HttpMethod};
use hosting_core::{ApiConfig, Credentials, Error, Result};
use serde_json::Value;
use std::time::Duration;

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP gateway to the provider API
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the gateway will:
/// - Perform GET requests
/// - Log the intended POST/PUT/DELETE payload
/// - **NOT** send the mutating request, returning the payload as `data`
///
/// # Security
///
/// The Debug implementation does NOT expose the credentials.
pub struct HttpGateway {
    /// Base URL and credentials
    /// ⚠️ NEVER log the credentials
    config: ApiConfig,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, perform GET requests but skip writes
    dry_run: bool,
}

// Custom Debug implementation that hides the credentials
impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.config.base_url())
            .field("credentials", &"<REDACTED>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl HttpGateway {
    /// Create a new HTTP gateway
    ///
    /// # Parameters
    ///
    /// - `config`: Base URL and credentials
    /// - `dry_run`: If true, perform GET requests but skip writes
    pub fn new(config: ApiConfig, dry_run: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config_invalid(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            dry_run,
        })
    }

    /// Create a new HTTP gateway (live mode)
    pub fn new_live(config: ApiConfig) -> Result<Self> {
        Self::new(config, false)
    }

    /// Create a new HTTP gateway (dry-run mode)
    pub fn new_dry_run(config: ApiConfig) -> Result<Self> {
        Self::new(config, true)
    }

    /// Whether writes are suppressed
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Describe a non-2xx status for error messages
fn describe_status(status: reqwest::StatusCode, body: &str) -> String {
    let kind = match status.as_u16() {
        401 | 403 => "Authentication failed: invalid API token or insufficient permissions",
        404 => "Not found",
        409 => "Conflict",
        429 => "Rate limit exceeded",
        500..=599 => "Provider server error",
        _ => "Request rejected",
    };

    if body.trim().is_empty() {
        format!("{} (status {})", kind, status)
    } else {
        format!("{} (status {}): {}", kind, status, body.trim())
    }
}

/// Extract `data` from a response body; empty bodies and missing `data` yield `Null`
fn unwrap_envelope(body: &str) -> std::result::Result<Value, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Object(mut envelope) => Ok(envelope.remove("data").unwrap_or(Value::Null)),
        _ => Ok(Value::Null),
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path);
        let fail = |cause: String| Error::api_request_failed(method.as_str(), path, cause);

        if self.dry_run && method.is_write() {
            let payload = body.as_ref().map(|v| v.to_string()).unwrap_or_default();
            tracing::info!(
                "[DRY-RUN] Would send {} request to {} with payload: {}",
                method,
                url,
                payload
            );
            return Ok(body.unwrap_or(Value::Null));
        }

        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(reqwest_method(method), &url);
        for (name, value) in self.config.headers() {
            builder = builder.header(name, value);
        }
        if let Credentials::Basic { user, password } = self.config.credentials() {
            builder = builder.basic_auth(user, Some(password));
        }
        if method.is_write() {
            builder = builder.header(reqwest::header::CONTENT_TYPE, "application/json");
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| fail(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| fail(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(fail(describe_status(status, &text)));
        }

        tracing::debug!("{} {} -> {}", method, path, status);

        unwrap_envelope(&text).map_err(|e| fail(format!("Failed to parse response: {}", e)))
    }

    fn gateway_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token_config(base_url: &str) -> ApiConfig {
        ApiConfig::new(base_url, Credentials::Token("secret_token_12345".into())).unwrap()
    }

    #[tokio::test]
    async fn test_get_unwraps_data_and_sends_auth_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/domains"))
            .and(header("API-TOKEN", "secret_token_12345"))
            .and(header_exists("X-CSRF-TOKEN"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": [{"name": "example.com"}]})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::new_live(token_config(&mock_server.uri())).unwrap();
        let data = gateway.request(HttpMethod::Get, "/domains", None).await.unwrap();

        assert_eq!(data, json!([{"name": "example.com"}]));
    }

    #[tokio::test]
    async fn test_basic_auth_without_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/domains"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ApiConfig::new(
            mock_server.uri(),
            Credentials::Basic {
                user: "jan".into(),
                password: "pw".into(),
            },
        )
        .unwrap();
        let gateway = HttpGateway::new_live(config).unwrap();

        assert_eq!(
            gateway.request(HttpMethod::Get, "/domains", None).await.unwrap(),
            json!([])
        );
    }

    #[tokio::test]
    async fn test_write_sends_json_body() {
        let mock_server = MockServer::start().await;
        let payload = json!([{"id": 1}, {"id": 2}]);

        Mock::given(method("DELETE"))
            .and(path("/domains/example.com/dns"))
            .and(header("content-type", "application/json"))
            .and(body_json(payload.clone()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::new_live(token_config(&mock_server.uri())).unwrap();
        let data = gateway
            .request(HttpMethod::Delete, "/domains/example.com/dns", Some(payload))
            .await
            .unwrap();

        assert_eq!(data, Value::Null);
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/domains/example.com/dns"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::new_live(token_config(&mock_server.uri())).unwrap();
        let err = gateway
            .request(HttpMethod::Get, "/domains/example.com/dns", None)
            .await
            .unwrap_err();

        match err {
            Error::ApiRequestFailed {
                method: failed_method,
                path: failed_path,
                cause,
            } => {
                assert_eq!(failed_method, "GET");
                assert_eq!(failed_path, "/domains/example.com/dns");
                assert!(cause.contains("503"));
                assert!(cause.contains("maintenance"));
                assert!(!cause.contains("secret_token_12345"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authentication_failure_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::new_live(token_config(&mock_server.uri())).unwrap();
        let err = gateway.request(HttpMethod::Get, "/domains", None).await.unwrap_err();

        assert!(err.to_string().contains("Authentication failed"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Nothing listens on port 1
        let gateway = HttpGateway::new_live(token_config("http://127.0.0.1:1")).unwrap();
        let err = gateway.request(HttpMethod::Get, "/domains", None).await.unwrap_err();

        assert!(matches!(err, Error::ApiRequestFailed { .. }));
    }

    #[tokio::test]
    async fn test_dry_run_skips_writes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::new_dry_run(token_config(&mock_server.uri())).unwrap();
        assert!(gateway.is_dry_run());

        let payload = json!([{"name": "www.example.com", "type": "A"}]);
        let data = gateway
            .request(HttpMethod::Post, "/domains/example.com/dns", Some(payload.clone()))
            .await
            .unwrap();

        assert_eq!(data, payload);
    }

    #[test]
    fn test_unwrap_envelope() {
        assert_eq!(unwrap_envelope("").unwrap(), Value::Null);
        assert_eq!(unwrap_envelope(r#"{"status":"ok"}"#).unwrap(), Value::Null);
        assert_eq!(unwrap_envelope(r#"{"data":{"id":3}}"#).unwrap(), json!({"id": 3}));
        assert!(unwrap_envelope("not json").is_err());
    }

    #[test]
    fn test_credentials_not_exposed_in_debug() {
        let gateway = HttpGateway::new_live(token_config("https://api.example.net")).unwrap();

        let debug_str = format!("{:?}", gateway);
        assert!(!debug_str.contains("secret_token"));
        assert!(debug_str.contains("HttpGateway"));
    }

    #[test]
    fn test_gateway_name() {
        let gateway = HttpGateway::new_live(token_config("https://api.example.net")).unwrap();
        assert_eq!(gateway.gateway_name(), "http");
    }
}
