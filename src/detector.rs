//! Local address detection.

use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use tokio::process::Command;

/// Source of the address the target records should point at.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressSource: Send + Sync {
    /// Resolve the current address. Called fresh every cycle.
    async fn resolve(&self) -> Result<String>;
}

/// Reads the first address reported by `hostname -I`.
pub struct HostnameResolver {
    program: String,
    args: Vec<String>,
}

impl HostnameResolver {
    /// Create a resolver backed by `hostname -I`.
    pub fn new() -> Self {
        Self::with_command("hostname", ["-I"])
    }

    /// Create with a custom command (for testing).
    pub fn with_command<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for HostnameResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressSource for HostnameResolver {
    async fn resolve(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DdnsError::AddressUnavailable(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DdnsError::AddressUnavailable(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let address = first_address(&stdout).ok_or_else(|| {
            DdnsError::AddressUnavailable(format!("{} reported no addresses", self.program))
        })?;

        tracing::debug!("Resolved local address {}", address);
        Ok(address.to_string())
    }
}

/// First whitespace-separated token of an address listing.
pub fn first_address(listing: &str) -> Option<&str> {
    listing.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    #[test]
    fn test_first_address() {
        assert_eq!(
            first_address("192.168.1.20 10.8.0.1 fd00::1 \n"),
            Some("192.168.1.20")
        );
        assert_eq!(first_address("  \n"), None);
    }

    #[tokio::test]
    async fn test_resolve_takes_first_token() {
        let resolver = HostnameResolver::with_command("echo", ["192.168.1.20 10.8.0.1"]);
        assert_eq!(resolver.resolve().await.unwrap(), "192.168.1.20");
    }

    #[tokio::test]
    async fn test_resolve_empty_output() {
        let resolver = HostnameResolver::with_command("true", Vec::<String>::new());
        let err = assert_err!(resolver.resolve().await);
        assert!(matches!(err, DdnsError::AddressUnavailable(_)));
    }

    #[tokio::test]
    async fn test_resolve_failing_command() {
        let resolver = HostnameResolver::with_command("false", Vec::<String>::new());
        let err = assert_err!(resolver.resolve().await);
        assert!(matches!(err, DdnsError::AddressUnavailable(_)));
    }

    #[tokio::test]
    async fn test_resolve_missing_program() {
        let resolver =
            HostnameResolver::with_command("cf-ddns-sync-no-such-binary", Vec::<String>::new());
        let err = assert_err!(resolver.resolve().await);
        assert!(matches!(err, DdnsError::AddressUnavailable(_)));
    }
}
