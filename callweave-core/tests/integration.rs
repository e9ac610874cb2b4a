//! Integration tests for the correlation pipeline
//!
//! These tests feed a fixture call-history window (`tests/fixtures/`)
//! through the full pipeline and check the synthesized report, end to
//! end: classification, masked caller resolution, chain grouping,
//! temporal correlation, and row synthesis.

use callweave_core::engine::{self, generate_report, CallPathSource};
use callweave_core::{CallPathDetail, CallRecord, Error, PathHop, Result};
use serde::Deserialize;
use std::future::Future;
use std::path::PathBuf;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/call-history")
        .join(name)
}

/// The shape of a raw call-history page, as the API returns it
#[derive(Deserialize)]
struct FixtureWindow {
    call_logs: Vec<CallRecord>,
}

fn load_fixture(name: &str) -> Vec<CallRecord> {
    let content = std::fs::read_to_string(fixture_path(name)).expect("fixture should exist");
    let window: FixtureWindow = serde_json::from_str(&content).expect("fixture should parse");
    window.call_logs
}

/// Path source that reports every caller as unmasked (two hops, empty
/// operator extension), so records pass through resolution untouched.
struct UnmaskedSource;

impl CallPathSource for UnmaskedSource {
    fn call_path(&self, _record_id: &str) -> impl Future<Output = Result<CallPathDetail>> + Send {
        async move {
            Ok(CallPathDetail {
                call_path: vec![PathHop::default(), PathHop::default()],
            })
        }
    }
}

/// Path source that resolves every lookup to a fixed operator.
struct MaskedSource;

impl CallPathSource for MaskedSource {
    fn call_path(&self, _record_id: &str) -> impl Future<Output = Result<CallPathDetail>> + Send {
        async move {
            Ok(CallPathDetail {
                call_path: vec![
                    PathHop {
                        operator_name: Some("Erin Rep".to_string()),
                        operator_ext_id: Some("ext-erin".to_string()),
                        operator_ext_number: Some("500".to_string()),
                        caller_email: None,
                    },
                    PathHop {
                        caller_email: Some("erin@acme.example".to_string()),
                        ..Default::default()
                    },
                ],
            })
        }
    }
}

#[tokio::test]
async fn test_sample_window_produces_three_batches() {
    let records = load_fixture("sample-window.json");
    assert_eq!(records.len(), 5);

    let processed = engine::process_call_logs(&UnmaskedSource, records, 4)
        .await
        .expect("pipeline should succeed");

    // The missed internal leg drops at classification, so chain-1 holds a
    // single internal leg plus the one matched outbound external.
    assert_eq!(processed.standalone_inbounds.len(), 1);
    assert_eq!(processed.standalone_outbounds.len(), 1);
    assert_eq!(processed.matched_external_count(), 1);

    let report = generate_report(&processed);
    assert_eq!(report.len(), 3);

    // Standalone inbound: rep is the callee side
    assert_eq!(report[0].len(), 1);
    let row = &report[0][0];
    assert_eq!(row.rep_ext.as_deref(), Some("101"));
    assert_eq!(row.rep_email.as_deref(), Some("alice@acme.example"));
    assert_eq!(row.customer_did.as_deref(), Some("+15550001111"));
    assert_eq!(row.duration, 300);

    // Standalone outbound: the unwrapped external call
    assert_eq!(report[1].len(), 1);
    let row = &report[1][0];
    assert_eq!(row.rep_ext.as_deref(), Some("400"));
    assert_eq!(row.rep_email.as_deref(), Some("dan@acme.example"));
    assert_eq!(row.customer_did.as_deref(), Some("+15559998888"));
    assert_eq!(row.duration, 240);

    // Chain batch: one matched outbound external over one outbound
    // internal leg
    assert_eq!(report[2].len(), 1);
    let row = &report[2][0];
    assert_eq!(row.rep_ext.as_deref(), Some("200"));
    assert_eq!(row.rep_email.as_deref(), Some("bob@acme.example"));
    assert_eq!(row.customer_did.as_deref(), Some("+15552223333"));
    assert_eq!(row.duration, 180);
}

#[tokio::test]
async fn test_no_record_is_double_counted() {
    let records = load_fixture("sample-window.json");

    let processed = engine::process_call_logs(&UnmaskedSource, records, 4)
        .await
        .unwrap();

    let standalone_ids: Vec<&str> = processed
        .standalone_inbounds
        .iter()
        .chain(&processed.standalone_outbounds)
        .map(|r| r.id.as_str())
        .collect();

    for (_, members) in processed.chains.iter() {
        for member in members.iter().filter(|m| m.matched) {
            assert!(
                !standalone_ids.contains(&member.id.as_str()),
                "record {} is both matched and standalone",
                member.id
            );
        }
    }

    for record in processed
        .standalone_inbounds
        .iter()
        .chain(&processed.standalone_outbounds)
    {
        assert!(!record.matched);
    }
}

#[tokio::test]
async fn test_masked_resolution_changes_correlation() {
    // With every outbound caller resolved to extension 500, the wrapped
    // external call no longer matches the internal leg at extension 200
    // and falls back to standalone with the resolved identity.
    let records = load_fixture("sample-window.json");

    let processed = engine::process_call_logs(&MaskedSource, records, 4)
        .await
        .unwrap();

    assert_eq!(processed.matched_external_count(), 0);
    assert_eq!(processed.standalone_outbounds.len(), 2);

    let report = generate_report(&processed);
    // 1 standalone inbound + 2 standalone outbounds, no chain batches
    assert_eq!(report.len(), 3);
    assert_eq!(report[1][0].rep_ext.as_deref(), Some("500"));
    assert_eq!(report[1][0].rep_email.as_deref(), Some("erin@acme.example"));
}

#[tokio::test]
async fn test_resolution_failures_do_not_block_the_report() {
    struct FailingSource;

    impl CallPathSource for FailingSource {
        fn call_path(
            &self,
            record_id: &str,
        ) -> impl Future<Output = Result<CallPathDetail>> + Send {
            let id = record_id.to_string();
            async move { Err(Error::Api(format!("rate limited fetching {}", id))) }
        }
    }

    let records = load_fixture("sample-window.json");

    let processed = engine::process_call_logs(&FailingSource, records, 4)
        .await
        .expect("per-record failures must not fail the run");

    // Both outbound externals failed resolution but kept their fields,
    // so correlation proceeds as in the unmasked case.
    assert_eq!(processed.resolution_failures.len(), 2);
    assert_eq!(processed.matched_external_count(), 1);

    let report = generate_report(&processed);
    assert_eq!(report.len(), 3);
}
