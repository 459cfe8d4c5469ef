//! Record query and filtering
//!
//! A query fetches the full record set of one domain and narrows it with the
//! filters derived from [`QueryCriteria`]. Filters run in a fixed order:
//! name, type, content, id. Server ordering is preserved throughout.

use super::{HostingEngine, records_path};
use crate::domain::resolve_domain;
use crate::error::{Error, Result};
use crate::record::{DnsRecord, RecordType};
use crate::traits::HttpMethod;
use tracing::debug;

/// Criteria for selecting records
///
/// At least one of `domain` or `name` must be set. Empty strings count as
/// unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    /// Domain whose records are fetched
    pub domain: Option<String>,
    /// Record name; substring match with a domain, exact match without
    pub name: Option<String>,
    /// Exact record type
    pub record_type: Option<RecordType>,
    /// Content substring
    pub content: Option<String>,
    /// Exact record id
    pub id: Option<u64>,
}

impl QueryCriteria {
    /// Criteria selecting every record of a domain
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Self::default()
        }
    }

    /// Criteria selecting records by exact name
    pub fn for_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Narrow by name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Narrow by record type
    pub fn with_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Narrow by content substring
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Narrow by record id
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Domain whose record set must be fetched
    ///
    /// The explicit domain wins; otherwise it is derived from the name.
    pub fn effective_domain(&self) -> Result<String> {
        match (self.domain(), self.name()) {
            (Some(domain), _) => Ok(domain.to_string()),
            (None, Some(name)) => resolve_domain(name),
            (None, None) => Err(Error::MissingSelector),
        }
    }

    /// Filters in application order
    pub fn filters(&self) -> Vec<RecordFilter> {
        let mut filters = Vec::new();

        match (self.domain(), self.name()) {
            (Some(_), Some(name)) => filters.push(RecordFilter::NameContains(name.to_string())),
            (None, Some(name)) => filters.push(RecordFilter::NameEquals(name.to_string())),
            _ => {}
        }
        if let Some(record_type) = &self.record_type {
            filters.push(RecordFilter::Type(record_type.clone()));
        }
        if let Some(content) = self.content.as_deref().filter(|c| !c.is_empty()) {
            filters.push(RecordFilter::ContentContains(content.to_string()));
        }
        if let Some(id) = self.id {
            filters.push(RecordFilter::Id(id));
        }

        filters
    }
}

/// A single narrowing step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    /// Name contains the value
    NameContains(String),
    /// Name equals the value
    NameEquals(String),
    /// Type equals the value
    Type(RecordType),
    /// Content contains the value
    ContentContains(String),
    /// Id equals the value
    Id(u64),
}

impl RecordFilter {
    /// Whether a record passes this filter
    pub fn matches(&self, record: &DnsRecord) -> bool {
        match self {
            RecordFilter::NameContains(name) => record.name.contains(name.as_str()),
            RecordFilter::NameEquals(name) => record.name == *name,
            RecordFilter::Type(record_type) => record.record_type == *record_type,
            RecordFilter::ContentContains(content) => record.content.contains(content.as_str()),
            RecordFilter::Id(id) => record.id == *id,
        }
    }

    /// Keep only records passing this filter, in their original order
    pub fn apply(&self, records: Vec<DnsRecord>) -> Vec<DnsRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

impl HostingEngine {
    /// Fetch the complete record set of a domain
    pub async fn fetch_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let data = self
            .gateway()
            .request(HttpMethod::Get, &records_path(domain), None)
            .await?;

        if data.is_null() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_value(data)?)
    }

    /// Query records matching the criteria
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSelector`]: neither domain nor name given
    /// - [`Error::NoRecordsForDomain`]: the domain has no records at all
    /// - [`Error::NoRecordsMatchingName`]: name-only query without an exact match
    /// - [`Error::NoMatchingCriteria`]: everything was filtered out. A plain
    ///   top-level query may treat this as "nothing matched"; callers that go
    ///   on to mutate must treat it as fatal
    pub async fn query_records(&self, criteria: &QueryCriteria) -> Result<Vec<DnsRecord>> {
        let domain = criteria.effective_domain()?;
        let mut records = self.fetch_records(&domain).await?;

        if records.is_empty() {
            return Err(Error::NoRecordsForDomain { domain });
        }

        debug!("Fetched {} record(s) for domain '{}'", records.len(), domain);

        for filter in criteria.filters() {
            records = filter.apply(records);

            if records.is_empty()
                && let RecordFilter::NameEquals(name) = &filter
            {
                return Err(Error::NoRecordsMatchingName {
                    name: name.clone(),
                    domain,
                });
            }
        }

        if records.is_empty() {
            return Err(Error::NoMatchingCriteria {
                name: criteria.name().unwrap_or_default().to_string(),
                domain,
            });
        }

        debug!("{} record(s) matched", records.len());
        Ok(records)
    }
}
