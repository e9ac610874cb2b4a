//! Shared builders for engine tests.

use crate::error::Result;
use crate::types::{CallPathDetail, CallRecord, ConnectType, Direction, PathHop};
use chrono::{DateTime, TimeZone, Utc};
use std::future::Future;

/// A bare record with the classification-relevant fields set and
/// everything else empty. Tests fill in what they need.
pub(crate) fn record(
    id: &str,
    call_id: &str,
    direction: Direction,
    call_result: &str,
    connect_type: ConnectType,
) -> CallRecord {
    CallRecord {
        id: id.to_string(),
        call_id: call_id.to_string(),
        direction,
        call_result: call_result.to_string(),
        connect_type,
        start_time: None,
        end_time: None,
        answer_time: None,
        caller_ext_number: None,
        callee_ext_number: None,
        caller_did_number: None,
        callee_did_number: None,
        caller_email: None,
        callee_email: None,
        caller_name: None,
        caller_ext_id: None,
        duration: 0,
        matched: false,
    }
}

/// A timestamp on a fixed test day.
pub(crate) fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, hour, min, sec).unwrap()
}

/// Path source whose every lookup yields an unresolvable two-hop path,
/// so records pass through resolution unchanged.
pub(crate) struct NullPathSource;

impl super::resolve::CallPathSource for NullPathSource {
    fn call_path(&self, _record_id: &str) -> impl Future<Output = Result<CallPathDetail>> + Send {
        async move {
            Ok(CallPathDetail {
                call_path: vec![PathHop::default(), PathHop::default()],
            })
        }
    }
}
