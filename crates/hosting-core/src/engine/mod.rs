//! Core record engine
//!
//! The HostingEngine is responsible for:
//! - Listing domains
//! - Querying and filtering DNS records
//! - Adding, updating and deleting DNS records
//!
//! ## Architecture
//!
//! ```text
//!                    ┌────────────────┐
//!   CLI dispatcher ─▶│ HostingEngine  │
//!                    └────────────────┘
//!                       │          │
//!            ┌──────────┘          └──────────┐
//!            ▼                                ▼
//!   ┌─────────────────┐              ┌──────────────┐
//!   │ resolve_domain  │              │  ApiGateway  │──▶ provider REST API
//!   │ (public suffix) │              │ (GET/PUT/..) │
//!   └─────────────────┘              └──────────────┘
//! ```
//!
//! ## Request Flow
//!
//! Every operation is a short, strictly sequential request chain. Update and
//! delete first query the current records, then issue exactly one mutating
//! request. A failure at any step aborts the whole operation; nothing is
//! retried and nothing is persisted locally.

mod mutation;
mod query;

pub use mutation::{RecordChanges, UpdateOutcome};
pub use query::{QueryCriteria, RecordFilter};

use crate::error::Result;
use crate::traits::{ApiGateway, HttpMethod};
use serde_json::Value;
use tracing::debug;

/// API path of the domain list
pub(crate) fn domains_path() -> String {
    "/domains".to_string()
}

/// API path of a single domain
pub(crate) fn domain_path(domain: &str) -> String {
    format!("/domains/{}", domain)
}

/// API path of a domain's record set
pub(crate) fn records_path(domain: &str) -> String {
    format!("/domains/{}/dns", domain)
}

/// Core record engine
///
/// The engine holds no state besides its gateway. Each call is independent
/// and safe to issue from a fresh process.
pub struct HostingEngine {
    /// Transport to the provider API
    gateway: Box<dyn ApiGateway>,
}

impl HostingEngine {
    /// Create a new engine on top of a gateway
    pub fn new(gateway: Box<dyn ApiGateway>) -> Self {
        debug!("Creating engine with gateway '{}'", gateway.gateway_name());
        Self { gateway }
    }

    /// List all domains, or fetch a single one
    ///
    /// The result is passed through as returned by the provider.
    pub async fn get_domains(&self, domain: Option<&str>) -> Result<Value> {
        let path = match domain.filter(|d| !d.is_empty()) {
            Some(domain) => domain_path(domain),
            None => domains_path(),
        };

        self.gateway.request(HttpMethod::Get, &path, None).await
    }

    pub(crate) fn gateway(&self) -> &dyn ApiGateway {
        self.gateway.as_ref()
    }
}

impl std::fmt::Debug for HostingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostingEngine")
            .field("gateway", &self.gateway.gateway_name())
            .finish()
    }
}
