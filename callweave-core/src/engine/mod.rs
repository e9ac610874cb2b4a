//! Call leg correlation engine
//!
//! This module turns a flat call-history list into correlated business
//! events through a fixed pipeline:
//!
//! ```text
//! ┌──────────────┐    ┌──────────┐    ┌─────────┐    ┌───────────┐
//! │ Call history │ ─► │ classify │ ─► │ resolve │ ─► │ group +   │ ─► ProcessedCallLogs
//! │ (flat list)  │    │          │    │ (async) │    │ correlate │
//! └──────────────┘    └──────────┘    └─────────┘    └───────────┘
//! ```
//!
//! Every step is pure and sequential except the masked-caller resolution,
//! which fans out per-record call path lookups with bounded concurrency.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use callweave_core::engine::{self, report};
//!
//! let processed = engine::process_call_logs(&client, call_logs, 4).await?;
//! let batches = report::generate_report(&processed);
//! ```

pub mod classify;
pub mod correlate;
pub mod group;
pub mod report;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testutil;

pub use classify::{classify, ClassifiedRecords};
pub use group::ChainGroups;
pub use report::generate_report;
pub use resolve::{CallPathSource, ResolutionFailure};

use crate::error::{Error, Result};
use crate::types::CallRecord;

/// Everything the pipeline knows after correlation, ready for report
/// synthesis.
#[derive(Debug, Default)]
pub struct ProcessedCallLogs {
    /// External-inbound records no chain accounted for
    pub standalone_inbounds: Vec<CallRecord>,
    /// External-outbound records no chain accounted for
    pub standalone_outbounds: Vec<CallRecord>,
    /// Internal chains, each holding its legs plus any matched externals
    pub chains: ChainGroups,
    /// Per-record call path failures that were recovered locally
    pub resolution_failures: Vec<ResolutionFailure>,
}

impl ProcessedCallLogs {
    /// Count of matched external records across all chains.
    pub fn matched_external_count(&self) -> usize {
        self.chains
            .iter()
            .flat_map(|(_, members)| members.iter())
            .filter(|r| r.matched)
            .count()
    }
}

/// Run the full correlation pipeline over a call-history list.
///
/// `concurrency` bounds the number of in-flight call path lookups.
/// An empty input is an error: a report over nothing is more likely a
/// bad date range than a quiet phone system, and the caller should hear
/// about it.
pub async fn process_call_logs<S>(
    source: &S,
    records: Vec<CallRecord>,
    concurrency: usize,
) -> Result<ProcessedCallLogs>
where
    S: CallPathSource,
{
    if records.is_empty() {
        return Err(Error::Input(
            "call history is empty, nothing to correlate".to_string(),
        ));
    }

    let classified = classify(&records);
    tracing::info!(
        total = records.len(),
        external_inbound = classified.external_inbound.len(),
        external_outbound = classified.external_outbound.len(),
        internal_outbound = classified.internal_outbound.len(),
        internal_inbound = classified.internal_inbound.len(),
        "call records classified"
    );

    let pool = classified.merged_internal();
    let ClassifiedRecords {
        external_inbound,
        external_outbound,
        ..
    } = classified;

    let (external_outbound, resolution_failures) =
        resolve::resolve_caller_identities(source, external_outbound, concurrency).await;
    if !resolution_failures.is_empty() {
        tracing::warn!(
            count = resolution_failures.len(),
            "some outbound records kept masked caller identities"
        );
    }

    let mut chains = ChainGroups::from_legs(&pool);
    let standalone_inbounds = correlate::correlate_inbound(external_inbound, &pool, &mut chains);
    let standalone_outbounds = correlate::correlate_outbound(external_outbound, &pool, &mut chains);

    let processed = ProcessedCallLogs {
        standalone_inbounds,
        standalone_outbounds,
        chains,
        resolution_failures,
    };

    tracing::info!(
        standalone_inbound = processed.standalone_inbounds.len(),
        standalone_outbound = processed.standalone_outbounds.len(),
        chains = processed.chains.len(),
        matched = processed.matched_external_count(),
        "correlation complete"
    );

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{at, record, NullPathSource};
    use crate::types::{ConnectType, Direction};

    #[tokio::test]
    async fn test_empty_input_is_fatal() {
        let result = process_call_logs(&NullPathSource, vec![], 4).await;
        assert!(matches!(result, Err(Error::Input(_))));
    }

    #[tokio::test]
    async fn test_pipeline_smoke() {
        // One internal leg wrapping one outbound external call
        let mut leg = record("leg", "c1", Direction::Outbound, "connected", ConnectType::Internal);
        leg.caller_ext_number = Some("200".to_string());
        leg.start_time = Some(at(10, 0, 0));
        leg.end_time = Some(at(10, 10, 0));

        let mut external =
            record("ext", "e1", Direction::Outbound, "connected", ConnectType::External);
        external.caller_ext_number = Some("200".to_string());
        external.start_time = Some(at(10, 2, 0));
        external.end_time = Some(at(10, 5, 0));

        let processed = process_call_logs(&NullPathSource, vec![leg, external], 4)
            .await
            .unwrap();

        assert!(processed.standalone_outbounds.is_empty());
        assert_eq!(processed.matched_external_count(), 1);
        assert_eq!(processed.chains.len(), 1);
    }
}
