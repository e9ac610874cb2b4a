//! Masked caller identity resolution
//!
//! Outbound records frequently report an auto-attendant or call queue as
//! the immediate caller. The true handling representative sits one hop up
//! the call path, so each external-outbound record gets a call-path
//! lookup: hop 0 names the answering operator, hop 1 carries the original
//! caller's email.
//!
//! Lookups are independent per record and run with bounded concurrency
//! (the detail endpoint is rate limited). Results are applied in the
//! original record order regardless of completion order.
//!
//! A failed lookup never fails the run: the record keeps its masked
//! caller fields and the failure is returned alongside the results.

use crate::error::{Error, Result};
use crate::types::{CallPathDetail, CallRecord};
use futures::stream::{self, StreamExt};
use std::future::Future;

/// Source of per-record call path details.
///
/// Implemented by the Zoom client; tests substitute canned paths.
pub trait CallPathSource {
    fn call_path(&self, record_id: &str) -> impl Future<Output = Result<CallPathDetail>> + Send;
}

/// A per-record resolution failure that was recovered locally.
#[derive(Debug)]
pub struct ResolutionFailure {
    pub record_id: String,
    pub error: Error,
}

/// Resolve masked caller identities for a batch of external-outbound
/// records.
///
/// Returns the records in their original order (enriched where a mask
/// was resolved) plus the failures encountered along the way.
pub async fn resolve_caller_identities<S>(
    source: &S,
    outbounds: Vec<CallRecord>,
    concurrency: usize,
) -> (Vec<CallRecord>, Vec<ResolutionFailure>)
where
    S: CallPathSource,
{
    let limit = concurrency.max(1);

    // buffered() keeps results in stream order, so record N lands back at
    // position N no matter which fetch finishes first.
    let outcomes: Vec<(CallRecord, Option<ResolutionFailure>)> = stream::iter(outbounds)
        .map(|record| resolve_one(source, record))
        .buffered(limit)
        .collect()
        .await;

    let mut records = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (record, failure) in outcomes {
        records.push(record);
        failures.extend(failure);
    }

    (records, failures)
}

async fn resolve_one<S>(source: &S, record: CallRecord) -> (CallRecord, Option<ResolutionFailure>)
where
    S: CallPathSource,
{
    let detail = match source.call_path(&record.id).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::warn!(
                record_id = %record.id,
                error = %e,
                "call path fetch failed, keeping masked caller fields"
            );
            let failure = ResolutionFailure {
                record_id: record.id.clone(),
                error: Error::Resolution {
                    record_id: record.id.clone(),
                    message: e.to_string(),
                },
            };
            return (record, Some(failure));
        }
    };

    // Hop 0 is the answering operator, hop 1 the original caller; a
    // shorter path cannot be resolved.
    let (Some(operator), Some(origin)) = (detail.call_path.first(), detail.call_path.get(1)) else {
        tracing::warn!(
            record_id = %record.id,
            hops = detail.call_path.len(),
            "call path too short to resolve, keeping masked caller fields"
        );
        let failure = ResolutionFailure {
            record_id: record.id.clone(),
            error: Error::Resolution {
                record_id: record.id.clone(),
                message: format!(
                    "call path has {} hop(s), expected at least 2",
                    detail.call_path.len()
                ),
            },
        };
        return (record, Some(failure));
    };

    // An empty operator extension means the caller was genuinely external
    // or the path is unresolved; leave the record as reported.
    if is_blank(operator.operator_ext_number.as_deref()) {
        return (record, None);
    }

    let mut resolved = record;
    resolved.caller_name = operator.operator_name.clone();
    resolved.caller_ext_id = operator.operator_ext_id.clone();
    resolved.caller_ext_number = operator.operator_ext_number.clone();
    resolved.caller_email = origin.caller_email.clone();

    tracing::debug!(
        record_id = %resolved.id,
        caller_ext = resolved.caller_ext_number.as_deref().unwrap_or(""),
        "masked caller resolved from call path"
    );

    (resolved, None)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).map_or(true, str::is_empty)
}
