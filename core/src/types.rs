//! Shared primitive types used across the dashboard core.

/// A stable client key, e.g. `DD-1004`.
pub type ClientId = String;

/// A payout confirmation key, e.g. `PAY-48213`.
pub type ConfirmationId = String;

/// Monetary amounts are dollars held as f64, rounded to cents at generation.
pub type Money = f64;

/// Round a monetary amount to two decimal places.
pub fn round_cents(value: Money) -> Money {
    (value * 100.0).round() / 100.0
}
