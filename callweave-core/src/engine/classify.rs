//! Call classification
//!
//! Partitions the raw call-history list into the semantic buckets the
//! rest of the engine works on: external customer calls (inbound and
//! outbound) and internal rep-to-rep legs. Records matching none of the
//! predicates are dropped without comment; the provider reports plenty of
//! legs (missed, voicemail, queue bounces) that carry no report value.

use crate::types::{CallRecord, ConnectType, Direction};

/// An inbound leg counts once the provider marks it answered.
const RESULT_ANSWERED: &str = "answered";
/// An outbound leg counts once the provider marks it connected.
const RESULT_CONNECTED: &str = "connected";

/// The four classification buckets.
///
/// Internal legs are kept per-direction here; [`ClassifiedRecords::merged_internal`]
/// produces the canonical pool the correlator scans.
#[derive(Debug, Default)]
pub struct ClassifiedRecords {
    /// `inbound` + `answered` + `external`: a customer called in
    pub external_inbound: Vec<CallRecord>,
    /// `outbound` + `connected` + `external`: a rep called a customer
    pub external_outbound: Vec<CallRecord>,
    /// `outbound` + `connected` + `internal`
    pub internal_outbound: Vec<CallRecord>,
    /// `inbound` + `answered` + `internal`
    pub internal_inbound: Vec<CallRecord>,
}

impl ClassifiedRecords {
    /// Merge the internal legs into the canonical correlation pool:
    /// outbound legs first, then inbound legs, input order preserved
    /// within each.
    ///
    /// The correlator resolves ties by first match over this pool, so the
    /// merge order is part of the engine's observable behavior.
    pub fn merged_internal(&self) -> Vec<CallRecord> {
        let mut pool =
            Vec::with_capacity(self.internal_outbound.len() + self.internal_inbound.len());
        pool.extend(self.internal_outbound.iter().cloned());
        pool.extend(self.internal_inbound.iter().cloned());
        pool
    }
}

/// Partition records into the classification buckets.
///
/// Pure: no record is mutated, input order is preserved within each
/// bucket, and running it twice yields identical buckets.
pub fn classify(records: &[CallRecord]) -> ClassifiedRecords {
    let mut classified = ClassifiedRecords::default();

    for record in records {
        match (record.direction, record.connect_type) {
            (Direction::Inbound, ConnectType::External) if record.call_result == RESULT_ANSWERED => {
                classified.external_inbound.push(record.clone());
            }
            (Direction::Outbound, ConnectType::External)
                if record.call_result == RESULT_CONNECTED =>
            {
                classified.external_outbound.push(record.clone());
            }
            (Direction::Outbound, ConnectType::Internal)
                if record.call_result == RESULT_CONNECTED =>
            {
                classified.internal_outbound.push(record.clone());
            }
            (Direction::Inbound, ConnectType::Internal) if record.call_result == RESULT_ANSWERED => {
                classified.internal_inbound.push(record.clone());
            }
            // Missed/voicemail/queue legs and unknown provider values
            _ => {}
        }
    }

    classified
}
