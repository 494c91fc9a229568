//! Payment channels and per-channel amount sets.

use crate::{
    error::{DashError, DashResult},
    types::{round_cents, Money},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the four money-movement methods tracked per client and per day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    #[serde(rename = "Cash App")]
    CashApp,
    Zelle,
    PayPal,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl Channel {
    /// Display order used by every table and chart.
    pub const ALL: [Channel; 4] = [Self::CashApp, Self::Zelle, Self::PayPal, Self::BankTransfer];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CashApp => "Cash App",
            Self::Zelle => "Zelle",
            Self::PayPal => "PayPal",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Channel {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match normalize_label(s).as_str() {
            "cashapp" => Ok(Self::CashApp),
            "zelle" => Ok(Self::Zelle),
            "paypal" => Ok(Self::PayPal),
            "banktransfer" | "bank" => Ok(Self::BankTransfer),
            _ => Err(DashError::parse("channel", s)),
        }
    }
}

/// Lower-case and strip separators so "Cash App", "cash_app" and "cash-app" compare equal.
pub(crate) fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// One amount per channel.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ChannelAmounts {
    pub cash_app: Money,
    pub zelle: Money,
    pub paypal: Money,
    pub bank_transfer: Money,
}

impl ChannelAmounts {
    pub fn get(&self, channel: Channel) -> Money {
        match channel {
            Channel::CashApp => self.cash_app,
            Channel::Zelle => self.zelle,
            Channel::PayPal => self.paypal,
            Channel::BankTransfer => self.bank_transfer,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut Money {
        match channel {
            Channel::CashApp => &mut self.cash_app,
            Channel::Zelle => &mut self.zelle,
            Channel::PayPal => &mut self.paypal,
            Channel::BankTransfer => &mut self.bank_transfer,
        }
    }

    /// Sum of the four channels, rounded to cents.
    pub fn total(&self) -> Money {
        round_cents(Channel::ALL.iter().map(|c| self.get(*c)).sum())
    }

    /// Channel-wise sum, used when totalling a filtered ledger view.
    pub fn accumulate(&mut self, other: &ChannelAmounts) {
        for channel in Channel::ALL {
            *self.get_mut(channel) += other.get(channel);
        }
    }

    pub fn rounded(mut self) -> Self {
        for channel in Channel::ALL {
            let value = self.get_mut(channel);
            *value = round_cents(*value);
        }
        self
    }
}
