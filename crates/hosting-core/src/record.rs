//! DNS record model
//!
//! Records are request-scoped values. [`DnsRecord`] mirrors what the provider
//! returns, [`NewRecord`] is the body of a create request and [`RecordId`] the
//! body element of a delete request.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// TTL values accepted by the provider
pub const ALLOWED_TTLS: [u32; 4] = [60, 300, 3600, 86400];

/// TTL used when creating a record without an explicit TTL
pub const DEFAULT_TTL: u32 = 3600;

/// Priority used when creating a record without an explicit priority
pub const DEFAULT_PRIO: u32 = 0;

/// DNS record type
///
/// The provider may return types this client cannot create (SOA, for example);
/// those round-trip unchanged through [`RecordType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Mx,
    Naptr,
    Ns,
    Ptr,
    Srv,
    Tlsa,
    Txt,
    /// Any type outside the supported set
    Other(String),
}

impl RecordType {
    /// Types that can be created, updated and filtered on
    pub const SUPPORTED: [RecordType; 11] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Caa,
        RecordType::Cname,
        RecordType::Mx,
        RecordType::Naptr,
        RecordType::Ns,
        RecordType::Ptr,
        RecordType::Srv,
        RecordType::Tlsa,
        RecordType::Txt,
    ];

    /// Wire name of the type
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Caa => "CAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Naptr => "NAPTR",
            RecordType::Ns => "NS",
            RecordType::Ptr => "PTR",
            RecordType::Srv => "SRV",
            RecordType::Tlsa => "TLSA",
            RecordType::Txt => "TXT",
            RecordType::Other(name) => name,
        }
    }

    fn known(name: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|t| t.as_str() == name)
    }

    fn known_ignore_case(name: &str) -> Option<Self> {
        Self::SUPPORTED
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parsing: only the supported types, spelled in upper case
impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::known(s).ok_or_else(|| {
            Error::invalid_input(format!(
                "Unsupported record type '{}' (expected one of {})",
                s,
                Self::SUPPORTED
                    .iter()
                    .map(RecordType::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }
}

/// Lenient conversion used when reading provider responses
impl From<String> for RecordType {
    fn from(value: String) -> Self {
        Self::known_ignore_case(&value).unwrap_or(RecordType::Other(value))
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

/// Validate a TTL against [`ALLOWED_TTLS`]
pub fn validate_ttl(ttl: u32) -> Result<u32> {
    if ALLOWED_TTLS.contains(&ttl) {
        Ok(ttl)
    } else {
        Err(Error::invalid_input(format!(
            "TTL {} is not allowed (expected one of {:?})",
            ttl, ALLOWED_TTLS
        )))
    }
}

/// A DNS record as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Server-assigned identifier
    pub id: u64,
    /// Fully-qualified record name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record content
    pub content: String,
    /// Time-to-live in seconds
    #[serde(default, deserialize_with = "null_as_zero")]
    pub ttl: u32,
    /// Priority (MX/SRV)
    #[serde(default, deserialize_with = "null_as_zero")]
    pub prio: u32,
    /// Server-defined fields passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// The provider sends `null` for numeric fields it has no value for
fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body element of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecord {
    name: String,
    #[serde(rename = "type")]
    record_type: RecordType,
    content: String,
    ttl: u32,
    prio: u32,
}

impl NewRecord {
    /// Build a create payload
    ///
    /// TXT content is wrapped in literal double quotes, the way the provider
    /// stores TXT data. Other types pass content through unchanged.
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        content: impl Into<String>,
        ttl: u32,
        prio: u32,
    ) -> Result<Self> {
        if let RecordType::Other(other) = &record_type {
            return Err(Error::invalid_input(format!(
                "Unsupported record type '{}'",
                other
            )));
        }

        let content = content.into();
        let content = if record_type == RecordType::Txt {
            format!("\"{}\"", content)
        } else {
            content
        };

        Ok(Self {
            name: name.into(),
            record_type,
            content,
            ttl: validate_ttl(ttl)?,
            prio,
        })
    }

    /// Record name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content as it will be sent
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Body element of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordId {
    /// Record to delete
    pub id: u64,
}
