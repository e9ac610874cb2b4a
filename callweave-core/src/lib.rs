//! # callweave-core
//!
//! Core library for callweave - a Zoom Phone call report generator.
//!
//! This library provides:
//! - Domain types for call records, call paths, and report rows
//! - The call leg correlation engine (classification, masked caller
//!   resolution, chain grouping, temporal matching, report synthesis)
//! - A Zoom Phone API client (OAuth, call history, call paths)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Raw call-history records flow through a fixed pipeline: classify into
//! external/internal buckets, resolve masked outbound caller identities
//! against the call-path endpoint, group internal legs into transfer
//! chains, temporally correlate external calls against those chains, and
//! flatten everything into report rows.
//!
//! ## Example
//!
//! ```rust,no_run
//! use callweave_core::engine::{self, report};
//! use callweave_core::{Config, ZoomClient};
//!
//! # async fn run() -> callweave_core::Result<()> {
//! let config = Config::load()?;
//! let mut client = ZoomClient::new(&config.zoom)?;
//! client.authenticate().await?;
//!
//! let from = "2026-03-01".parse().unwrap();
//! let to = "2026-03-31".parse().unwrap();
//! let call_logs = client.call_history(from, to).await?;
//!
//! let processed = engine::process_call_logs(&client, call_logs, 4).await?;
//! let batches = report::generate_report(&processed);
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use client::ZoomClient;
pub use config::Config;
pub use engine::{process_call_logs, ProcessedCallLogs};
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod types;
