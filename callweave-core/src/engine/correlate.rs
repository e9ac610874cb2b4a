//! Temporal correlation of external calls against internal chains
//!
//! Each external record is scanned against the merged internal-leg pool.
//! The two directions use different predicates:
//!
//! - An inbound customer call matches an internal leg whose answer
//!   instant falls strictly inside the customer call's window and whose
//!   caller extension equals the customer call's callee extension. The
//!   representative "picked up" mid-call.
//! - An outbound customer call matches an internal leg whose window
//!   strictly contains the customer call's window and whose caller
//!   extension equals the customer call's caller extension. The
//!   representative was already on the internal leg and dialed out of it.
//!
//! All inequalities are strict; equal boundary instants never match. A
//! record missing any predicate operand (null timestamp, null extension)
//! simply never matches and stays standalone.
//!
//! Ties resolve to the first satisfying leg in pool order: outbound
//! internal legs in input order, then inbound internal legs. No secondary
//! ranking.

use crate::engine::group::ChainGroups;
use crate::types::CallRecord;

/// Inbound predicate: leg answer instant strictly inside the external
/// window, callee extension equal to the leg's caller extension.
pub fn matches_inbound(external: &CallRecord, leg: &CallRecord) -> bool {
    let (Some(start), Some(end)) = (external.start_time, external.end_time) else {
        return false;
    };
    let Some(answer) = leg.answer_time else {
        return false;
    };
    let (Some(callee_ext), Some(leg_caller_ext)) =
        (&external.callee_ext_number, &leg.caller_ext_number)
    else {
        return false;
    };

    answer > start && answer < end && callee_ext == leg_caller_ext
}

/// Outbound predicate: leg window strictly contains the external window,
/// caller extensions equal.
pub fn matches_outbound(external: &CallRecord, leg: &CallRecord) -> bool {
    let (Some(start), Some(end)) = (external.start_time, external.end_time) else {
        return false;
    };
    let (Some(leg_start), Some(leg_end)) = (leg.start_time, leg.end_time) else {
        return false;
    };
    let (Some(caller_ext), Some(leg_caller_ext)) =
        (&external.caller_ext_number, &leg.caller_ext_number)
    else {
        return false;
    };

    leg_start < start && leg_end > end && caller_ext == leg_caller_ext
}

/// Correlate external-inbound records against the internal pool.
///
/// Matched records are appended to their leg's chain with `matched`
/// set; the returned list holds the standalone remainder.
pub fn correlate_inbound(
    externals: Vec<CallRecord>,
    pool: &[CallRecord],
    chains: &mut ChainGroups,
) -> Vec<CallRecord> {
    correlate_pass(externals, pool, chains, matches_inbound)
}

/// Correlate external-outbound records against the internal pool.
pub fn correlate_outbound(
    externals: Vec<CallRecord>,
    pool: &[CallRecord],
    chains: &mut ChainGroups,
) -> Vec<CallRecord> {
    correlate_pass(externals, pool, chains, matches_outbound)
}

fn correlate_pass<F>(
    externals: Vec<CallRecord>,
    pool: &[CallRecord],
    chains: &mut ChainGroups,
    predicate: F,
) -> Vec<CallRecord>
where
    F: Fn(&CallRecord, &CallRecord) -> bool,
{
    let mut standalone = Vec::new();

    for mut external in externals {
        // First satisfying leg in pool order wins
        let Some(leg) = pool.iter().find(|leg| predicate(&external, leg)) else {
            standalone.push(external);
            continue;
        };

        match chains.get_mut(&leg.call_id) {
            Some(chain) => {
                external.matched = true;
                tracing::debug!(
                    record_id = %external.id,
                    chain_id = %leg.call_id,
                    "external call correlated to internal chain"
                );
                chain.push(external);
            }
            // Unreachable when the pool and the chains were built from the
            // same legs; the record stays standalone rather than vanishing.
            None => standalone.push(external),
        }
    }

    standalone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{at, record};
    use crate::types::{ConnectType, Direction};

    fn internal_leg(id: &str, call_id: &str, caller_ext: &str) -> CallRecord {
        let mut leg = record(id, call_id, Direction::Outbound, "connected", ConnectType::Internal);
        leg.caller_ext_number = Some(caller_ext.to_string());
        leg
    }

    fn external_inbound(id: &str, callee_ext: &str) -> CallRecord {
        let mut rec = record(id, "ext-call", Direction::Inbound, "answered", ConnectType::External);
        rec.callee_ext_number = Some(callee_ext.to_string());
        rec
    }

    fn external_outbound(id: &str, caller_ext: &str) -> CallRecord {
        let mut rec = record(id, "ext-call", Direction::Outbound, "connected", ConnectType::External);
        rec.caller_ext_number = Some(caller_ext.to_string());
        rec
    }

    #[test]
    fn test_inbound_point_correctness() {
        // Leg answered at 10:03 inside the external window [10:00, 10:10]
        let mut leg = internal_leg("leg", "c1", "100");
        leg.answer_time = Some(at(10, 3, 0));

        let mut external = external_inbound("ext", "100");
        external.start_time = Some(at(10, 0, 0));
        external.end_time = Some(at(10, 10, 0));

        assert!(matches_inbound(&external, &leg));
    }

    #[test]
    fn test_inbound_boundary_is_strict() {
        let mut leg = internal_leg("leg", "c1", "100");
        leg.answer_time = Some(at(10, 0, 0));

        let mut external = external_inbound("ext", "100");
        external.start_time = Some(at(10, 0, 0));
        external.end_time = Some(at(10, 10, 0));

        // answer_time == start_time must not match
        assert!(!matches_inbound(&external, &leg));
    }

    #[test]
    fn test_inbound_extension_mismatch() {
        let mut leg = internal_leg("leg", "c1", "200");
        leg.answer_time = Some(at(10, 3, 0));

        let mut external = external_inbound("ext", "100");
        external.start_time = Some(at(10, 0, 0));
        external.end_time = Some(at(10, 10, 0));

        assert!(!matches_inbound(&external, &leg));
    }

    #[test]
    fn test_outbound_containment_correctness() {
        // Internal leg [10:00, 10:10] strictly contains external [10:02, 10:05]
        let mut leg = internal_leg("leg", "c1", "100");
        leg.start_time = Some(at(10, 0, 0));
        leg.end_time = Some(at(10, 10, 0));

        let mut external = external_outbound("ext", "100");
        external.start_time = Some(at(10, 2, 0));
        external.end_time = Some(at(10, 5, 0));

        assert!(matches_outbound(&external, &leg));
    }

    #[test]
    fn test_outbound_equal_boundaries_do_not_match() {
        let mut leg = internal_leg("leg", "c1", "100");
        leg.start_time = Some(at(10, 0, 0));
        leg.end_time = Some(at(10, 10, 0));

        let mut external = external_outbound("ext", "100");
        external.start_time = Some(at(10, 0, 0));
        external.end_time = Some(at(10, 10, 0));

        assert!(!matches_outbound(&external, &leg));
    }

    #[test]
    fn test_missing_timestamps_never_match() {
        let leg = internal_leg("leg", "c1", "100");
        let external = external_inbound("ext", "100");

        // No timestamps anywhere: non-matchable, not an error
        assert!(!matches_inbound(&external, &leg));
        assert!(!matches_outbound(&external, &leg));
    }

    #[test]
    fn test_first_match_tie_break() {
        // Two legs both satisfy the predicate; the earlier pool entry wins.
        let mut first = internal_leg("first", "c1", "100");
        first.answer_time = Some(at(10, 2, 0));
        let mut second = internal_leg("second", "c2", "100");
        second.answer_time = Some(at(10, 3, 0));

        let mut external = external_inbound("ext", "100");
        external.start_time = Some(at(10, 0, 0));
        external.end_time = Some(at(10, 10, 0));

        let pool = vec![first, second];
        let mut chains = ChainGroups::from_legs(&pool);

        let standalone = correlate_inbound(vec![external], &pool, &mut chains);

        assert!(standalone.is_empty());
        assert_eq!(chains.get("c1").unwrap().len(), 2);
        assert_eq!(chains.get("c2").unwrap().len(), 1);
    }

    #[test]
    fn test_matched_exclusivity() {
        let mut leg = internal_leg("leg", "c1", "100");
        leg.start_time = Some(at(10, 0, 0));
        leg.end_time = Some(at(10, 10, 0));

        let mut matched = external_outbound("hit", "100");
        matched.start_time = Some(at(10, 2, 0));
        matched.end_time = Some(at(10, 5, 0));

        let mut unmatched = external_outbound("miss", "999");
        unmatched.start_time = Some(at(10, 2, 0));
        unmatched.end_time = Some(at(10, 5, 0));

        let pool = vec![leg];
        let mut chains = ChainGroups::from_legs(&pool);

        let standalone = correlate_outbound(vec![matched, unmatched], &pool, &mut chains);

        // The matched record lives in the chain, the other stays standalone
        let ids: Vec<_> = standalone.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["miss"]);
        assert!(!standalone[0].matched);

        let members = chains.get("c1").unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].id, "hit");
        assert!(members[1].matched);
    }
}
