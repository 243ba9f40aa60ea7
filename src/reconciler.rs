//! One reconciliation pass: bring every target A-record in line with the host address.

use crate::config::{Config, TargetDomains};
use crate::detector::AddressSource;
use crate::error::{DdnsError, Result};
use crate::providers::{DnsProvider, Record, Zone};
use std::sync::Arc;

/// Record type this daemon manages.
pub const MANAGED_RECORD_TYPE: &str = "A";

/// What to do with a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    /// Not a target A-record.
    Skip,
    /// Target A-record that already points at the address.
    AlreadySet,
    /// Target A-record with stale content.
    Update,
}

/// Decide what to do with `record` given the current `address`.
pub fn plan(record: &Record, targets: &TargetDomains, address: &str) -> RecordAction {
    if record.record_type != MANAGED_RECORD_TYPE || !targets.contains(&record.name) {
        RecordAction::Skip
    } else if record.content == address {
        RecordAction::AlreadySet
    } else {
        RecordAction::Update
    }
}

/// Tally of a completed cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Address the cycle reconciled against.
    pub address: String,
    pub zones_scanned: usize,
    /// Zones whose records could not be listed.
    pub zones_failed: usize,
    pub already_set: usize,
    pub updated: usize,
    pub update_failures: usize,
}

/// Result of [`Reconciler::run_cycle`].
#[derive(Debug)]
pub enum CycleOutcome {
    /// Every zone was attempted; individual failures are counted in the report.
    Completed(CycleReport),
    /// No decision could be made (address or zone list unavailable).
    Aborted(DdnsError),
}

/// Per-zone result, reported upward instead of unwinding.
enum ZoneOutcome {
    Reconciled,
    Skipped(DdnsError),
}

/// Reconciles provider records against the local address.
pub struct Reconciler {
    config: Arc<Config>,
    provider: Box<dyn DnsProvider>,
    resolver: Box<dyn AddressSource>,
}

impl Reconciler {
    pub fn new(
        config: Arc<Config>,
        provider: Box<dyn DnsProvider>,
        resolver: Box<dyn AddressSource>,
    ) -> Self {
        Self {
            config,
            provider,
            resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one cycle. Never fails: errors are logged and folded into the outcome.
    pub async fn run_cycle(&self) -> CycleOutcome {
        match self.try_cycle().await {
            Ok(report) => {
                tracing::debug!(
                    address = %report.address,
                    zones = report.zones_scanned,
                    zones_failed = report.zones_failed,
                    already_set = report.already_set,
                    updated = report.updated,
                    update_failures = report.update_failures,
                    "Cycle complete"
                );
                CycleOutcome::Completed(report)
            }
            Err(e) => {
                tracing::error!("ERROR: {}", e);
                CycleOutcome::Aborted(e)
            }
        }
    }

    async fn try_cycle(&self) -> Result<CycleReport> {
        let address = self.resolver.resolve().await?;
        let zones = self.provider.list_zones().await?;

        let mut report = CycleReport {
            address,
            ..CycleReport::default()
        };

        for zone in &zones {
            report.zones_scanned += 1;
            if let ZoneOutcome::Skipped(e) = self.reconcile_zone(zone, &mut report).await {
                tracing::error!("ERROR: {}", e);
                report.zones_failed += 1;
            }
        }

        Ok(report)
    }

    async fn reconcile_zone(&self, zone: &Zone, report: &mut CycleReport) -> ZoneOutcome {
        let records = match self.provider.list_records(zone).await {
            Ok(records) => records,
            Err(e) => return ZoneOutcome::Skipped(e),
        };

        for record in &records {
            match plan(record, &self.config.targets, &report.address) {
                RecordAction::Skip => {}
                RecordAction::AlreadySet => {
                    tracing::info!(
                        "SUCCESS: A-record for '{}' was already set to '{}'",
                        record.name,
                        report.address
                    );
                    report.already_set += 1;
                }
                RecordAction::Update => {
                    let result = self
                        .provider
                        .update_record(zone, record, &report.address)
                        .await;
                    match result {
                        Ok(()) => {
                            tracing::info!(
                                "SUCCESS: Updated A-record for '{}' to '{}'",
                                record.name,
                                report.address
                            );
                            report.updated += 1;
                        }
                        Err(e) => {
                            tracing::error!("ERROR: {}", e);
                            report.update_failures += 1;
                        }
                    }
                }
            }
        }

        ZoneOutcome::Reconciled
    }
}
