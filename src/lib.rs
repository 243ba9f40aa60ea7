//! # cf-ddns-sync
//!
//! A dynamic DNS daemon that keeps Cloudflare A-records pointed at this host.
//!
//! ## Features
//!
//! - Local address detection (first address from `hostname -I`)
//! - Walks every zone and record visible to the API token
//! - Updates only A-records whose name is in the configured target list
//! - Per-zone and per-record fault isolation; the next cycle retries anything skipped
//!
//! ## Usage
//!
//! ```bash
//! DOMAINS=home.example.com,vpn.example.com \
//! CLOUDFLARE_API_TOKEN=... \
//! MINUTE_INTERVAL=5 \
//! cf-ddns-sync
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod providers;
pub mod reconciler;
pub mod scheduler;

pub use config::Config;
pub use detector::{AddressSource, HostnameResolver};
pub use error::{DdnsError, Result};
pub use reconciler::{CycleOutcome, CycleReport, Reconciler};
pub use scheduler::Scheduler;
