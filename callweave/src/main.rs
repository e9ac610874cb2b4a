//! callweave - Zoom Phone call report generator
//!
//! Fetches the account call history for a date range, correlates external
//! customer calls with internal transfer chains, and prints the report as
//! JSON.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Config: $XDG_CONFIG_HOME/callweave/config.toml (~/.config/callweave/config.toml)
//! - Logs: $XDG_STATE_HOME/callweave/callweave.log (~/.local/state/callweave/callweave.log)

use anyhow::{bail, Context, Result};
use callweave_core::engine::{self, generate_report};
use callweave_core::{Config, ZoomClient};
use chrono::{Local, Months, NaiveDate};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "callweave")]
#[command(about = "Generate a representative call report from Zoom Phone call history")]
#[command(version)]
struct Args {
    /// Start of the report window (YYYY-MM-DD)
    #[arg(long)]
    from: NaiveDate,

    /// End of the report window (YYYY-MM-DD)
    #[arg(long)]
    to: NaiveDate,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read configuration from a specific file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Cheap argument checks first, before config or network
    validate_window(args.from, args.to)?;

    // Ensure XDG environment variables are set before using core library
    Config::ensure_xdg_env();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    config.resolver.validate().context("invalid configuration")?;

    // Initialize logging (to file, stdout carries the report)
    let _log_guard =
        callweave_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!(from = %args.from, to = %args.to, "callweave starting");

    let mut client = ZoomClient::new(&config.zoom).context("failed to create Zoom client")?;

    let pb = spinner("Retrieving access token");
    client
        .authenticate()
        .await
        .context("failed to retrieve access token")?;
    pb.finish_with_message("Access token retrieved");

    if !client.has_call_log_scope() {
        bail!("granted scopes do not include call log access; check the Zoom app configuration");
    }

    let pb = spinner("Fetching call history");
    let call_logs = client
        .call_history(args.from, args.to)
        .await
        .context("failed to fetch call history")?;
    pb.finish_with_message(format!("Fetched {} call records", call_logs.len()));

    let pb = spinner("Correlating call legs");
    let processed = engine::process_call_logs(&client, call_logs, config.resolver.concurrency)
        .await
        .context("failed to process call logs")?;
    pb.finish_with_message(format!(
        "Correlated {} chains, {} standalone calls",
        processed.chains.len(),
        processed.standalone_inbounds.len() + processed.standalone_outbounds.len()
    ));

    if !processed.resolution_failures.is_empty() {
        eprintln!(
            "Warning: {} record(s) kept masked caller identities (see log for details)",
            processed.resolution_failures.len()
        );
    }

    let report = generate_report(&processed);
    let batch_count = report.len();
    let payload = serde_json::json!({ "report": report });
    let serialized = if args.compact {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, serialized.as_bytes())
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{}", serialized),
    }

    tracing::info!(batches = batch_count, "callweave complete");

    Ok(())
}

/// Enforce the provider's documented constraints on the report window:
/// at most a month long, no earlier than six months back.
fn validate_window(from: NaiveDate, to: NaiveDate) -> Result<()> {
    if to < from {
        bail!("--to must not be earlier than --from");
    }
    if (to - from).num_days() > 31 {
        bail!("the report window must be a month or less");
    }

    let today = Local::now().date_naive();
    let earliest = today.checked_sub_months(Months::new(6)).unwrap_or(today);
    if from < earliest {
        bail!("--from must fall within the last six months");
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}
