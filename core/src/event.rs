//! Session events: an in-memory audit trail of user actions.
//!
//! Events are never persisted; they live and die with the session.

use crate::rng::DatasetSlot;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Variants are only appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionInitialized {
        at: NaiveDateTime,
        seed: u64,
        clients: usize,
        ledger_days: usize,
        payouts: usize,
    },
    DatasetRefreshed {
        at: NaiveDateTime,
        dataset: DatasetSlot,
        epoch: u64,
        rows: usize,
    },
    ClientsExported {
        at: NaiveDateTime,
        file_name: String,
        rows: usize,
    },
    ReportRequested {
        at: NaiveDateTime,
    },
}

/// A sequenced event in the session log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLogEntry {
    pub seq: u64,
    pub event: SessionEvent,
}
