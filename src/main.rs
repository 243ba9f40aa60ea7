//! cf-ddns-sync - keeps Cloudflare A-records pointed at this host.

use chrono::Local;
use clap::Parser;
use cf_ddns_sync::config::{Config, DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT_SECS};
use cf_ddns_sync::detector::HostnameResolver;
use cf_ddns_sync::providers::CloudflareClient;
use cf_ddns_sync::reconciler::Reconciler;
use cf_ddns_sync::scheduler::Scheduler;
use std::sync::Arc;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cf-ddns-sync")]
#[command(about = "Keeps Cloudflare A-records pointed at this host's address")]
#[command(version)]
struct Cli {
    /// Comma-separated record names to keep updated
    #[arg(long, env = "DOMAINS", value_delimiter = ',', required = true)]
    domains: Vec<String>,

    /// Cloudflare API token
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Minutes between reconciliation cycles
    #[arg(long, env = "MINUTE_INTERVAL")]
    minute_interval: u64,

    /// Cloudflare API base URL
    #[arg(long, env = "CLOUDFLARE_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Timeout for each API request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_timer(LocalTime)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::new(&cli.domains, cli.api_token, cli.minute_interval)?
        .with_api_base(cli.api_base)
        .with_request_timeout(cli.request_timeout_secs)?;
    let config = Arc::new(config);

    let provider = CloudflareClient::new(&config)?;
    let reconciler = Reconciler::new(
        config,
        Box::new(provider),
        Box::new(HostnameResolver::new()),
    );

    Scheduler::new(reconciler).run().await;

    Ok(())
}
