//! Error types for the hosting API client
//!
//! Every failure the client can hit is a variant here. Nothing in the library
//! decides on process exit codes; the binary's dispatcher does that.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hosting API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the hosting API client
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist
    #[error("Config file '{}' does not exist", path.display())]
    ConfigMissing {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The configuration file exists but is unusable
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Transport failure or non-2xx response from the provider API
    #[error("{method} {path} failed: {cause}")]
    ApiRequestFailed {
        /// HTTP method of the failed request
        method: String,
        /// API path (relative to the base URL)
        path: String,
        /// Human-readable cause
        cause: String,
    },

    /// Neither a domain nor a record name was given to a query
    #[error("Either option -d (domain) or -n (name) is required")]
    MissingSelector,

    /// The domain exists but holds no records at all
    #[error("No record(s) found for domain '{domain}'")]
    NoRecordsForDomain {
        /// Domain that was queried
        domain: String,
    },

    /// No record carries exactly the requested name
    #[error("No record(s) found for '{name}' in domain '{domain}'")]
    NoRecordsMatchingName {
        /// Requested record name
        name: String,
        /// Domain that was queried
        domain: String,
    },

    /// Records exist, but the type/content/id filters removed all of them
    #[error("Record(s) were found for '{name}' in domain '{domain}', but not matching your criteria")]
    NoMatchingCriteria {
        /// Requested record name (empty when only a domain was given)
        name: String,
        /// Domain that was queried
        domain: String,
    },

    /// An update or delete found nothing to act on
    #[error("Record '{name}' cannot be found in domain '{domain}'")]
    RecordNotFound {
        /// Requested record name
        name: String,
        /// Domain that was queried
        domain: String,
    },

    /// No registrable domain could be derived from a name
    #[error("Cannot derive a registrable domain from '{0}'")]
    InvalidName(String),

    /// Invalid input handed to the library
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config_invalid(msg: impl Into<String>) -> Self {
        Self::ConfigInvalid(msg.into())
    }

    /// Create an API request error
    pub fn api_request_failed(
        method: impl Into<String>,
        path: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self::ApiRequestFailed {
            method: method.into(),
            path: path.into(),
            cause: cause.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether a plain top-level query may treat this error as "nothing matched".
    ///
    /// Only [`Error::NoMatchingCriteria`] qualifies. The same error is fatal
    /// when it surfaces from inside an update or delete.
    pub fn is_benign_for_query(&self) -> bool {
        matches!(self, Self::NoMatchingCriteria { .. })
    }
}
