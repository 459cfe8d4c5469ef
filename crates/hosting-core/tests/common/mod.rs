//! Test doubles and common utilities for the record engine contract tests
//!
//! The mock gateway answers from canned responses and records every request,
//! so tests can assert exactly which calls reached the "provider".

#![allow(dead_code)]

use hosting_core::error::{Error, Result};
use hosting_core::traits::{ApiGateway, HttpMethod};
use hosting_core::HostingEngine;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request as seen by the mock gateway
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// A mock ApiGateway that answers from canned responses and tracks calls
///
/// Unregistered GETs fail like a 404. Unregistered writes echo their body
/// back as `data`.
pub struct MockGateway {
    /// Canned `data` values per (method, path)
    responses: Arc<Mutex<HashMap<(HttpMethod, String), Value>>>,
    /// Forced failures per (method, path)
    failures: Arc<Mutex<HashMap<(HttpMethod, String), String>>>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `records` for `GET /domains/{domain}/dns`
    pub fn with_records(self, domain: &str, records: Value) -> Self {
        self.respond(HttpMethod::Get, &format!("/domains/{}/dns", domain), records)
    }

    /// Answer `method path` with `data`
    pub fn respond(self, method: HttpMethod, path: &str, data: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), data);
        self
    }

    /// Fail `method path` with an ApiRequestFailed error
    pub fn fail(self, method: HttpMethod, path: &str, cause: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert((method, path.to_string()), cause.to_string());
        self
    }

    /// Create a new MockGateway that shares state with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            responses: Arc::clone(&other.responses),
            failures: Arc::clone(&other.failures),
            requests: Arc::clone(&other.requests),
        }
    }

    /// All recorded requests
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests with a mutating method
    pub fn write_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.is_write())
            .collect()
    }

    /// Number of requests with `method`
    pub fn request_count(&self, method: HttpMethod) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

#[async_trait::async_trait]
impl ApiGateway for MockGateway {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.clone(),
        });

        let key = (method, path.to_string());

        if let Some(cause) = self.failures.lock().unwrap().get(&key) {
            return Err(Error::api_request_failed(method.as_str(), path, cause.clone()));
        }

        if let Some(data) = self.responses.lock().unwrap().get(&key) {
            return Ok(data.clone());
        }

        match method {
            HttpMethod::Get => Err(Error::api_request_failed(
                method.as_str(),
                path,
                "HTTP 404 Not Found",
            )),
            _ => Ok(body.unwrap_or(Value::Null)),
        }
    }

    fn gateway_name(&self) -> &'static str {
        "mock"
    }
}

/// Build an engine whose gateway shares state with `gateway`
pub fn engine_with(gateway: &MockGateway) -> HostingEngine {
    HostingEngine::new(Box::new(MockGateway::sharing_counters_with(gateway)))
}

/// A record as the provider returns it
pub fn record_json(id: u64, name: &str, record_type: &str, content: &str, ttl: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": record_type,
        "content": content,
        "ttl": ttl,
        "prio": 0
    })
}

/// A small record set for `example.com`
pub fn example_com_records() -> Value {
    json!([
        record_json(1, "foo.example.com", "A", "192.0.2.1", 300),
        record_json(2, "bar.example.com", "A", "192.0.2.2", 3600),
        record_json(3, "foo.example.com", "TXT", "\"v=spf1 -all\"", 3600),
        record_json(4, "foo.example.com", "AAAA", "2001:db8::1", 3600),
        record_json(5, "example.com", "MX", "mail.example.com", 3600),
        record_json(6, "foobar.example.com", "A", "192.0.2.6", 300),
    ])
}
