//! Tally CLI - JSON-RPC count metrics plugin binary

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tally_client::ClientConfig;
use tally_plugin::CountPlugin;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Issue one JSON-RPC call and report the element count of its result
/// as a time-series metric.
#[derive(Parser, Debug)]
#[command(name = "tally", version)]
struct Args {
    /// JSON-RPC endpoint URL
    #[arg(long, default_value = "http://127.0.0.1")]
    url: Url,

    /// HTTP Basic user
    #[arg(long)]
    user: String,

    /// HTTP Basic password
    #[arg(long, default_value = "")]
    password: String,

    /// Metric key prefix
    #[arg(long, default_value = "jsonrpc")]
    metric_key_prefix: String,

    /// Maximum wait for the whole exchange, in seconds
    #[arg(long, default_value_t = 10)]
    connect_timeout: u64,

    /// State file path passed by the agent; the count metric keeps no state
    #[arg(long)]
    tempfile: Option<PathBuf>,

    /// JSON-RPC method to invoke
    #[arg(long)]
    methodname: String,

    /// Graph key the metric is reported under
    #[arg(long, default_value = "")]
    label: String,

    /// Method arguments as a JSON array string
    #[arg(long, default_value = "[]")]
    arg: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tally=info".parse()?))
        .init();

    let args = Args::parse();

    // Configuration errors are the only non-zero exits, and they all
    // happen before any network call. A failed collection cycle still
    // emits a zero-valued data point and exits 0.
    let params: Vec<Value> =
        serde_json::from_str(&args.arg).context("--arg cannot be interpreted as a JSON array")?;

    let config = ClientConfig {
        endpoint: args.url,
        username: args.user,
        password: args.password,
        timeout: Duration::from_secs(args.connect_timeout),
    };

    if let Some(path) = &args.tempfile {
        debug!(path = %path.display(), "tempfile accepted but unused");
    }

    let plugin = CountPlugin::new(config, args.methodname, params)?
        .with_label(args.label)
        .with_prefix(args.metric_key_prefix);

    tally_plugin::run(&plugin).await?;

    Ok(())
}
