//! Record mutations: add, update, delete
//!
//! Update and delete follow a fetch-filter-mutate-resend cycle: the current
//! records are queried first, the payload is derived from them, and exactly
//! one mutating request is sent.

use super::{HostingEngine, QueryCriteria, records_path};
use crate::domain::resolve_domain;
use crate::error::{Error, Result};
use crate::record::{DnsRecord, NewRecord, RecordId, RecordType, validate_ttl};
use crate::traits::HttpMethod;
use serde_json::Value;
use tracing::{debug, info};

/// Fields to overwrite on an existing record
///
/// `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordChanges {
    /// New record type
    pub record_type: Option<RecordType>,
    /// New content
    pub content: Option<String>,
    /// New TTL
    pub ttl: Option<u32>,
    /// New priority
    pub prio: Option<u32>,
}

impl RecordChanges {
    /// Check the supplied values before any request is made
    pub fn validate(&self) -> Result<()> {
        if let Some(RecordType::Other(name)) = &self.record_type {
            return Err(Error::invalid_input(format!(
                "Unsupported record type '{}'",
                name
            )));
        }
        if let Some(ttl) = self.ttl {
            validate_ttl(ttl)?;
        }
        Ok(())
    }

    /// Overwrite the supplied fields on `record`
    pub fn apply_to(&self, record: &mut DnsRecord) {
        if let Some(record_type) = &self.record_type {
            record.record_type = record_type.clone();
        }
        if let Some(content) = &self.content {
            record.content = content.clone();
        }
        if let Some(ttl) = self.ttl {
            record.ttl = ttl;
        }
        if let Some(prio) = self.prio {
            record.prio = prio;
        }
    }
}

/// Result of an update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The record was sent to the provider; holds the provider's response
    Updated(Value),
    /// The changes matched the stored record; nothing was sent
    Unchanged,
}

impl HostingEngine {
    /// Create a record
    ///
    /// The domain is derived from the record name. Returns the created
    /// record(s) as reported by the provider.
    pub async fn add_record(&self, record: NewRecord) -> Result<Value> {
        let domain = resolve_domain(record.name())?;
        let name = record.name().to_string();
        let payload = serde_json::to_value(vec![record])?;

        debug!("Adding record to '{}': {}", domain, payload);

        let data = self
            .gateway()
            .request(HttpMethod::Post, &records_path(&domain), Some(payload))
            .await?;

        info!("DNS record '{}' successfully added", name);
        Ok(data)
    }

    /// Apply partial changes to the record with `id` and `name`
    ///
    /// The record is looked up by exact name and id. When applying the changes
    /// leaves the serialized record untouched, no request is sent and
    /// [`UpdateOutcome::Unchanged`] is returned.
    pub async fn update_record(
        &self,
        id: u64,
        name: &str,
        changes: &RecordChanges,
    ) -> Result<UpdateOutcome> {
        changes.validate()?;
        let domain = resolve_domain(name)?;

        let criteria = QueryCriteria::for_name(name).with_id(id);
        let original = self.find_existing(&criteria, name, &domain).await?;

        let mut proposed = original.clone();
        changes.apply_to(&mut proposed[0]);

        let original_body = serde_json::to_string(&original)?;
        let proposed_body = serde_json::to_string(&proposed)?;

        if proposed_body == original_body {
            info!("No changes found, not updating record");
            return Ok(UpdateOutcome::Unchanged);
        }

        debug!("Updating record in '{}': {}", domain, proposed_body);

        let data = self
            .gateway()
            .request(
                HttpMethod::Put,
                &records_path(&domain),
                Some(serde_json::to_value(&proposed)?),
            )
            .await?;

        info!("DNS record '{}' successfully updated", name);
        Ok(UpdateOutcome::Updated(data))
    }

    /// Delete every record with exactly `name`, optionally narrowed by type
    /// and content substring
    ///
    /// All matches are removed with a single request.
    pub async fn delete_records(
        &self,
        name: &str,
        record_type: Option<RecordType>,
        content: Option<&str>,
    ) -> Result<Value> {
        let domain = resolve_domain(name)?;

        let mut criteria = QueryCriteria::for_name(name);
        criteria.record_type = record_type;
        criteria.content = content.map(str::to_string);

        let matched = self.find_existing(&criteria, name, &domain).await?;

        let payload: Vec<RecordId> = matched.iter().map(|r| RecordId { id: r.id }).collect();
        debug!("Deleting {} record(s) from '{}'", payload.len(), domain);

        let data = self
            .gateway()
            .request(
                HttpMethod::Delete,
                &records_path(&domain),
                Some(serde_json::to_value(&payload)?),
            )
            .await?;

        info!("DNS record(s) for '{}' successfully deleted", name);
        Ok(data)
    }

    /// Records a mutation operates on; an empty match is [`Error::RecordNotFound`]
    async fn find_existing(
        &self,
        criteria: &QueryCriteria,
        name: &str,
        domain: &str,
    ) -> Result<Vec<DnsRecord>> {
        let not_found = || Error::RecordNotFound {
            name: name.to_string(),
            domain: domain.to_string(),
        };

        match self.query_records(criteria).await {
            Ok(records) if records.is_empty() => Err(not_found()),
            Ok(records) => Ok(records),
            Err(Error::NoRecordsMatchingName { .. } | Error::NoMatchingCriteria { .. }) => {
                Err(not_found())
            }
            Err(e) => Err(e),
        }
    }
}
