//! Filtered views over the three datasets.
//!
//! RULE: Filters never mutate or reorder their source.
//! A filtered view is a Vec of references into the session's data,
//! so applying the same filter to a view yields the same view.

use crate::{
    client_registry::{Client, PayoutStatus, Verification},
    daily_ledger::LedgerEntry,
    error::DashError,
    payout_journal::{ConfirmationStatus, PayoutConfirmation},
    types::Money,
};
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A single-choice selector over a closed set, with "All" as the relaxed choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = DashError>,
{
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, DashError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.trim().parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr<Err = DashError>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A predicate over one row type.
pub trait RowFilter<T> {
    fn admits(&self, row: &T) -> bool;

    /// Keep the admitted rows, in source order.
    fn apply<'a, I>(&self, rows: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        rows.into_iter().filter(|row| self.admits(row)).collect()
    }
}

/// Inclusive integer bounds on current balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceRange {
    pub min: i64,
    pub max: i64,
}

impl BalanceRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// `[0, ceil(max current balance)]`: the widest slider position, admitting every client.
    pub fn covering(clients: &[Client]) -> Self {
        let top = clients
            .iter()
            .map(|c| c.current_balance)
            .fold(0.0_f64, f64::max);
        Self { min: 0, max: top.ceil() as i64 }
    }

    /// Both ends inclusive. An inverted range admits nothing.
    pub fn contains(&self, balance: Money) -> bool {
        balance >= self.min as f64 && balance <= self.max as f64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientFilter {
    pub verification: Selection<Verification>,
    pub payout_status: Selection<PayoutStatus>,
    /// `None` leaves balances unconstrained.
    pub balance: Option<BalanceRange>,
    /// Case-insensitive substring of name or email; empty matches everyone.
    pub search: String,
}

impl RowFilter<Client> for ClientFilter {
    fn admits(&self, client: &Client) -> bool {
        self.verification.admits(&client.verification())
            && self.payout_status.admits(&client.payout_status)
            && self.balance.map_or(true, |range| range.contains(client.current_balance))
            && matches_search(client, &self.search)
    }
}

fn matches_search(client: &Client, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    client.name.to_lowercase().contains(&needle) || client.email.to_lowercase().contains(&needle)
}

/// Ledger date selection, as delivered by a date picker.
///
/// Only a selection of exactly two dates filters anything. While the user is
/// mid-pick (zero or one date) the full ledger passes through.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerFilter {
    pub date_range: Vec<NaiveDate>,
}

impl LedgerFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self { date_range: vec![start, end] }
    }

    /// `Some((start, end))` when the selection is a complete range.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.date_range.as_slice() {
            [start, end] => Some((*start, *end)),
            _ => None,
        }
    }

    /// Like [`RowFilter::apply`], but logs when the incomplete-range fallback applies.
    pub fn view<'a>(&self, entries: &'a [LedgerEntry]) -> Vec<&'a LedgerEntry> {
        if self.bounds().is_none() {
            log::debug!(
                "ledger filter: {} date bound(s) supplied, passing all {} days",
                self.date_range.len(),
                entries.len()
            );
        }
        self.apply(entries)
    }
}

impl RowFilter<LedgerEntry> for LedgerFilter {
    fn admits(&self, entry: &LedgerEntry) -> bool {
        match self.bounds() {
            Some((start, end)) => entry.date >= start && entry.date <= end,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PayoutFilter {
    pub status: Selection<ConfirmationStatus>,
}

impl RowFilter<PayoutConfirmation> for PayoutFilter {
    fn admits(&self, payout: &PayoutConfirmation) -> bool {
        self.status.admits(&payout.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parses_all_and_labels() {
        let all: Selection<PayoutStatus> = "All".parse().unwrap();
        assert_eq!(all, Selection::All);

        let pending: Selection<PayoutStatus> = "pending".parse().unwrap();
        assert_eq!(pending, Selection::Only(PayoutStatus::Pending));

        let failed: Selection<ConfirmationStatus> = " Failed ".parse().unwrap();
        assert_eq!(failed, Selection::Only(ConfirmationStatus::Failed));

        assert!("Shipped".parse::<Selection<ConfirmationStatus>>().is_err());
    }

    #[test]
    fn selection_serde_uses_labels() {
        let json = serde_json::to_string(&Selection::Only(Verification::Unverified)).unwrap();
        assert_eq!(json, "\"Unverified\"");

        let back: Selection<Verification> = serde_json::from_str("\"All\"").unwrap();
        assert_eq!(back, Selection::All);
    }

    #[test]
    fn balance_range_is_inclusive_on_both_ends() {
        let range = BalanceRange::new(100, 200);
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(99.99));
        assert!(!range.contains(200.01));
        assert!(!BalanceRange::new(10, 5).contains(7.0));
    }

    #[test]
    fn ledger_bounds_require_exactly_two_dates() {
        let d = |day| NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        assert_eq!(LedgerFilter::default().bounds(), None);
        assert_eq!(LedgerFilter { date_range: vec![d(1)] }.bounds(), None);
        assert_eq!(LedgerFilter { date_range: vec![d(1), d(2), d(3)] }.bounds(), None);
        assert_eq!(LedgerFilter::between(d(1), d(9)).bounds(), Some((d(1), d(9))));
    }
}
