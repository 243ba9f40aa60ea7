//! Process configuration for cf-ddns-sync.
//!
//! Everything here is read once at startup and shared read-only afterwards.

use crate::error::{DdnsError, Result};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Default Cloudflare API base.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Record names this daemon is allowed to update.
    pub targets: TargetDomains,

    /// Bearer credential for the provider API.
    pub api_token: ApiToken,

    /// Minutes between reconciliation cycles.
    pub interval_minutes: u64,

    /// Provider API base URL, without trailing slash.
    pub api_base: String,

    /// Timeout applied to every provider request.
    pub request_timeout: Duration,

    interval: Duration,
}

impl Config {
    /// Build and validate a configuration.
    pub fn new<I, S>(
        domains: I,
        api_token: impl Into<String>,
        interval_minutes: u64,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets = TargetDomains::new(domains);
        if targets.is_empty() {
            return Err(DdnsError::Config(
                "At least one target domain is required".to_string(),
            ));
        }

        let api_token = ApiToken::new(api_token);
        if api_token.expose().trim().is_empty() {
            return Err(DdnsError::Config("API token must not be empty".to_string()));
        }

        if interval_minutes == 0 {
            return Err(DdnsError::Config(
                "Interval must be a positive number of minutes".to_string(),
            ));
        }
        let interval = interval_minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                DdnsError::Config(format!("Interval of {} minutes is too large", interval_minutes))
            })?;

        Ok(Self {
            targets,
            api_token,
            interval_minutes,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            interval,
        })
    }

    /// Override the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(DdnsError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }
        self.request_timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// Interval between cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Set of fully-qualified names eligible for update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDomains(HashSet<String>);

impl TargetDomains {
    /// Build the set, dropping blank entries.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            domains
                .into_iter()
                .map(|d| normalize(d.as_ref()))
                .filter(|d| !d.is_empty())
                .collect(),
        )
    }

    /// Whether `name` is one of the targets.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// DNS names compare case-insensitively; "a.example.com." and "a.example.com" are the same name.
fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Provider credential. Never printed.
#[derive(Clone)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for the Authorization header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<REDACTED>)")
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}
