//! Display formatting for dashboard cards and tables.
//! Exports never use these; they carry raw values.

use crate::types::Money;

/// `$1,234.56`; negative amounts render as `-$1,234.56`.
pub fn format_currency(amount: Money) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${dollars}.{:02}", cents % 100)
}

/// `12.3%`, or `N/A` when the rate is not applicable.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{rate:.1}%"),
        None => "N/A".into(),
    }
}

/// Currency for an optional average.
pub fn format_optional_currency(amount: Option<Money>) -> String {
    amount.map_or_else(|| "N/A".into(), format_currency)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
