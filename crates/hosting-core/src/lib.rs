// # hosting-core
//
// Core library for the hosting DNS-management API client.
//
// ## Architecture Overview
//
// - **ApiConfig**: Immutable credentials + base URL, loaded once from `~/.hosting-api.ini`
// - **ApiGateway**: Trait for issuing requests against the provider REST API
// - **resolve_domain**: Registrable domain of a record name (public suffix list)
// - **HostingEngine**: Record query, add, update and delete on top of a gateway
//
// ## Design Principles
//
// 1. **Library-First**: The binary only parses arguments and maps errors to exit codes
// 2. **Fail-Fast**: Every failure is returned to the caller; nothing is retried
// 3. **No Shared State**: Configuration is passed in explicitly, never global
// 4. **Idempotent Updates**: An update that changes nothing sends nothing

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use config::{ApiConfig, Credentials};
pub use domain::resolve_domain;
pub use engine::{HostingEngine, QueryCriteria, RecordChanges, RecordFilter, UpdateOutcome};
pub use error::{Error, Result};
pub use record::{DnsRecord, NewRecord, RecordId, RecordType};
pub use traits::{ApiGateway, HttpMethod};
