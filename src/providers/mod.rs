//! DNS provider API access.

mod cloudflare;


pub use cloudflare::CloudflareClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// A DNS zone managed at the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// A single DNS record within a zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
}

/// Remote operations the reconciler needs from a DNS provider.
///
/// Implementations do not retry; failures go back to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every zone visible to the credential.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// List every record in `zone`.
    async fn list_records(&self, zone: &Zone) -> Result<Vec<Record>>;

    /// Set the content of `record` in `zone`, leaving every other field alone.
    async fn update_record(&self, zone: &Zone, record: &Record, content: &str) -> Result<()>;
}
