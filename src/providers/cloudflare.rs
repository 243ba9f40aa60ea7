//! Cloudflare API v4 client.

use super::{DnsProvider, Record, Zone};
use crate::config::{ApiToken, Config};
use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Page size requested from list endpoints.
const PER_PAGE: u32 = 50;

/// Cloudflare DNS client.
#[derive(Debug)]
pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: ApiToken,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CloudflareResponse<T> {
    result: Option<Vec<T>>,
    #[serde(default)]
    result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
struct ResultInfo {
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Serialize)]
struct PatchRequest<'a> {
    content: &'a str,
}

impl CloudflareClient {
    /// Create a client from the process configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(
            config.api_token.clone(),
            config.api_base.clone(),
            config.request_timeout,
        )
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(
        api_token: ApiToken,
        base_url: String,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_token.expose())
    }

    /// Fetch every page of a list endpoint.
    async fn get_all<T: DeserializeOwned>(&self, path: &str, context: String) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let response = self
                .client
                .get(&url)
                .header("Authorization", self.bearer())
                .query(&[("page", page), ("per_page", PER_PAGE)])
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(DdnsError::ProviderUnavailable {
                    context,
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: CloudflareResponse<T> = serde_json::from_str(&body)?;
            let batch = parsed.result.unwrap_or_default();
            let total_pages = parsed.result_info.map(|info| info.total_pages).unwrap_or(0);
            let exhausted = batch.is_empty();
            items.extend(batch);

            if exhausted || page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[async_trait]
impl DnsProvider for CloudflareClient {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let zones: Vec<Zone> = self.get_all("/zones", "get zones".to_string()).await?;
        tracing::debug!("Fetched {} zones", zones.len());
        Ok(zones)
    }

    async fn list_records(&self, zone: &Zone) -> Result<Vec<Record>> {
        let records: Vec<Record> = self
            .get_all(
                &format!("/zones/{}/dns_records", zone.id),
                format!("get records for zone '{}' ({})", zone.id, zone.name),
            )
            .await?;
        tracing::debug!("Fetched {} records for zone {}", records.len(), zone.name);
        Ok(records)
    }

    async fn update_record(&self, zone: &Zone, record: &Record, content: &str) -> Result<()> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, zone.id, record.id
        );

        let response = self
            .client
            .patch(&url)
            .header("Authorization", self.bearer())
            .json(&PatchRequest { content })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(DdnsError::ProviderUnavailable {
                context: format!("update A-record for '{}' to '{}'", record.name, content),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
