//! Status → style lookups for the presentation layer.
//!
//! Keyed by closed enums; adding a variant is a compile error here until styled.

use crate::{
    channel::Channel,
    client_registry::{PayoutStatus, Verification},
    payout_journal::ConfirmationStatus,
};
use serde::Serialize;

/// Cell colours for a highlighted table cell.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CellStyle {
    pub background: &'static str,
    pub foreground: &'static str,
}

pub fn confirmation_style(status: ConfirmationStatus) -> CellStyle {
    match status {
        ConfirmationStatus::Completed => CellStyle { background: "#d4edda", foreground: "#155724" },
        ConfirmationStatus::Processing => CellStyle { background: "#fff3cd", foreground: "#856404" },
        ConfirmationStatus::Failed => CellStyle { background: "#f8d7da", foreground: "#721c24" },
    }
}

pub fn payout_status_colour(status: PayoutStatus) -> &'static str {
    match status {
        PayoutStatus::Confirmed => "#28a745",
        PayoutStatus::Pending | PayoutStatus::Processing => "#ffc107",
    }
}

pub fn verification_colour(verification: Verification) -> &'static str {
    match verification {
        Verification::Verified => "#28a745",
        Verification::Unverified => "#dc3545",
    }
}

/// Slice colour in the channel breakdown chart.
pub fn channel_colour(channel: Channel) -> &'static str {
    match channel {
        Channel::CashApp => "#FF6B6B",
        Channel::Zelle => "#4ECDC4",
        Channel::PayPal => "#45B7D1",
        Channel::BankTransfer => "#96CEB4",
    }
}
