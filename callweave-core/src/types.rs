//! Core domain types for callweave
//!
//! These types mirror the JSON payloads of the Zoom Phone call-history API
//! and the shapes the correlation engine derives from them.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Leg** | One call record describing one side/segment of a logical call |
//! | **Chain** | The internal legs sharing a `call_id`, i.e. an internal transfer sequence |
//! | **Masked caller** | An outbound record whose caller fields name a proxy (auto-attendant) rather than the handling representative |
//! | **Standalone event** | An external record that could not be correlated to any chain |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Call record
// ============================================

/// Direction of a call leg as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
    /// Catch-all for provider values outside the documented set; such
    /// records fall through classification and are dropped.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
            Direction::Unknown => "unknown",
        }
    }
}

/// Whether a leg connects to an external party or stays inside the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectType {
    Internal,
    External,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ConnectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectType::Internal => "internal",
            ConnectType::External => "external",
            ConnectType::Unknown => "unknown",
        }
    }
}

/// One raw call log record from the call-history API.
///
/// Deserializes straight from a Zoom `call_logs` entry. Timestamps are all
/// optional: the provider omits `answer_time` on unanswered outbound legs,
/// and a record with a missing window timestamp is still ingested (it just
/// never satisfies a matching predicate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    /// Opaque record identifier, unique per leg
    pub id: String,

    /// Chain/session identifier shared by all legs of one logical call
    pub call_id: String,

    #[serde(default)]
    pub direction: Direction,

    /// Provider-defined status string; only "answered" and "connected"
    /// participate in classification
    #[serde(default)]
    pub call_result: String,

    #[serde(default)]
    pub connect_type: ConnectType,

    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub answer_time: Option<DateTime<Utc>>,

    /// Internal extension of the calling party
    pub caller_ext_number: Option<String>,
    /// Internal extension of the called party
    pub callee_ext_number: Option<String>,

    /// External dialed number of the calling party
    pub caller_did_number: Option<String>,
    /// External dialed number of the called party
    pub callee_did_number: Option<String>,

    pub caller_email: Option<String>,
    pub callee_email: Option<String>,

    pub caller_name: Option<String>,
    pub caller_ext_id: Option<String>,

    /// Duration in seconds
    #[serde(default)]
    pub duration: i64,

    /// Set by the temporal correlator once the record has been written
    /// into a chain group. Never present on input.
    #[serde(skip)]
    pub matched: bool,
}

// ============================================
// Call path
// ============================================

/// One hop in a call path.
///
/// Hop 0 carries the answering operator's identity; hop 1 carries the
/// original caller's email. All fields may be empty, which signals a
/// masked or unresolved hop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathHop {
    pub operator_name: Option<String>,
    pub operator_ext_id: Option<String>,
    pub operator_ext_number: Option<String>,
    pub caller_email: Option<String>,
}

/// Per-record call path detail from the call-history detail endpoint.
///
/// A resolvable masked caller requires at least two hops; shorter paths
/// are rejected by the resolver rather than indexed into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallPathDetail {
    #[serde(default)]
    pub call_path: Vec<PathHop>,
}

// ============================================
// Report output
// ============================================

/// One flat report row: which representative handled which customer
/// number, and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub rep_ext: Option<String>,
    pub rep_email: Option<String>,
    pub customer_did: Option<String>,
    pub duration: i64,
}
