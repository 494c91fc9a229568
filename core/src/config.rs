use crate::error::{DashError, DashResult};
use serde::{Deserialize, Serialize};

/// Number of distinct `PAY-xxxxx` identifiers (10000..=99999).
pub const CONFIRMATION_ID_SPACE: usize = 90_000;

/// Upper bound on any day span: ledger length and the default date window.
pub const MAX_DAYS: usize = 3_650;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashConfig {
    /// Master seed for every dataset stream.
    pub seed: u64,
    pub client_count: usize,
    pub ledger_days: usize,
    pub payout_count: usize,
    /// Width of the default ledger date window, ending today.
    pub date_window_days: i64,
    /// File name prefix for client exports.
    pub export_prefix: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            client_count: 20,
            ledger_days: 30,
            payout_count: 15,
            date_window_days: 7,
            export_prefix: "dragon_dash_clients".into(),
        }
    }
}

impl DashConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// The result is validated before it is returned.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters the generators cannot honour.
    pub fn validate(&self) -> DashResult<()> {
        if self.client_count == 0 {
            return Err(DashError::invalid_config("client_count", "must be positive"));
        }
        if self.ledger_days == 0 {
            return Err(DashError::invalid_config("ledger_days", "must be positive"));
        }
        if self.ledger_days > MAX_DAYS {
            return Err(DashError::invalid_config(
                "ledger_days",
                format!("cannot exceed {MAX_DAYS} days"),
            ));
        }
        if self.payout_count == 0 {
            return Err(DashError::invalid_config("payout_count", "must be positive"));
        }
        if self.payout_count > CONFIRMATION_ID_SPACE {
            return Err(DashError::invalid_config(
                "payout_count",
                format!("cannot exceed {CONFIRMATION_ID_SPACE} unique confirmation ids"),
            ));
        }
        if self.date_window_days < 0 {
            return Err(DashError::invalid_config("date_window_days", "must not be negative"));
        }
        if self.date_window_days > MAX_DAYS as i64 {
            return Err(DashError::invalid_config(
                "date_window_days",
                format!("cannot exceed {MAX_DAYS} days"),
            ));
        }
        if self.export_prefix.trim().is_empty() {
            return Err(DashError::invalid_config("export_prefix", "must not be empty"));
        }
        Ok(())
    }
}
