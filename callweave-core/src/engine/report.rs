//! Report synthesis
//!
//! Flattens the processed call logs into report batches. Standalone
//! external calls each produce a single-row batch; every chain with at
//! least one matched external call produces one batch holding the cross
//! product of its matched externals and its internal legs.
//!
//! Field selection for chain rows depends on both directions:
//! the internal leg's direction decides which side of it names the
//! representative, and the external leg's direction decides which DID is
//! the customer's. Durations come from the external leg except in the
//! inbound-external over inbound-internal case, where the
//! representative-facing duration is the internal leg's own.

use crate::engine::ProcessedCallLogs;
use crate::types::{CallRecord, ConnectType, Direction, ReportRow};

/// Synthesize report batches in processing order: standalone inbounds,
/// standalone outbounds, then chains in first-seen order.
pub fn generate_report(processed: &ProcessedCallLogs) -> Vec<Vec<ReportRow>> {
    let mut report = Vec::new();

    for inbound in &processed.standalone_inbounds {
        report.push(vec![standalone_inbound_row(inbound)]);
    }

    for outbound in &processed.standalone_outbounds {
        report.push(vec![standalone_outbound_row(outbound)]);
    }

    for (_call_id, members) in processed.chains.iter() {
        let (internal_legs, external_legs): (Vec<&CallRecord>, Vec<&CallRecord>) = members
            .iter()
            .partition(|r| r.connect_type == ConnectType::Internal);

        let mut rows = Vec::new();
        for external in &external_legs {
            for internal in &internal_legs {
                if let Some(row) = chain_row(external, internal) {
                    rows.push(row);
                }
            }
        }

        // A chain nobody called into or out of contributes nothing
        if !rows.is_empty() {
            report.push(rows);
        }
    }

    report
}

/// An unmatched inbound customer call: the callee side is the rep, the
/// caller DID is the customer.
fn standalone_inbound_row(record: &CallRecord) -> ReportRow {
    ReportRow {
        rep_ext: record.callee_ext_number.clone(),
        rep_email: record.callee_email.clone(),
        customer_did: record.caller_did_number.clone(),
        duration: record.duration,
    }
}

/// An unmatched outbound customer call: the caller side is the rep, the
/// callee DID is the customer.
fn standalone_outbound_row(record: &CallRecord) -> ReportRow {
    ReportRow {
        rep_ext: record.caller_ext_number.clone(),
        rep_email: record.caller_email.clone(),
        customer_did: record.callee_did_number.clone(),
        duration: record.duration,
    }
}

/// One row for a (matched external, internal leg) pair in a chain.
fn chain_row(external: &CallRecord, internal: &CallRecord) -> Option<ReportRow> {
    let customer_did = match external.direction {
        Direction::Outbound => external.callee_did_number.clone(),
        Direction::Inbound => external.caller_did_number.clone(),
        Direction::Unknown => return None,
    };

    let (rep_ext, rep_email) = match internal.direction {
        Direction::Outbound => (
            internal.caller_ext_number.clone(),
            internal.caller_email.clone(),
        ),
        _ => (
            internal.callee_ext_number.clone(),
            internal.callee_email.clone(),
        ),
    };

    // The one asymmetric case: an inbound customer call reaching an
    // inbound internal transfer leg reports the internal leg's duration,
    // the time that rep actually spent on the line.
    let duration = match (external.direction, internal.direction) {
        (Direction::Inbound, Direction::Inbound) => internal.duration,
        _ => external.duration,
    };

    Some(ReportRow {
        rep_ext,
        rep_email,
        customer_did,
        duration,
    })
}
