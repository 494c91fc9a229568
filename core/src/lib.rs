//! Dragon Dash analytics core.
//!
//! Seeded demo datasets (client registry, daily ledger, payout journal),
//! owned by a [`session::DashSession`], filtered into read-only views,
//! summarised, and exported as CSV. Rendering is left to the caller.

pub mod channel;
pub mod client_registry;
pub mod clock;
pub mod config;
pub mod daily_ledger;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod export;
pub mod filter;
pub mod format;
pub mod metrics;
pub mod name_generator;
pub mod payout_journal;
pub mod rng;
pub mod session;
pub mod style;
pub mod types;
