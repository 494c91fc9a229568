//! Deterministic random number generation.
//!
//! RULE: Nothing in the dashboard core may call any platform RNG.
//! All randomness flows through DatasetRng instances derived
//! from the single master seed held by the session config.
//!
//! Each dataset gets its own RNG stream, seeded deterministically
//! from (master_seed, dataset slot, refresh epoch). This means:
//!   - Refreshing one dataset never changes another dataset's stream.
//!   - Every regeneration is reproducible given the seed and refresh count.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

/// A named, deterministic RNG for a single dataset generation.
pub struct DatasetRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl DatasetRng {
    /// Create a dataset RNG from the master seed, a stable slot index
    /// and the refresh epoch. The slot index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64, epoch: u64) -> Self {
        let derived_seed = master_seed
            ^ slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ epoch.wrapping_mul(0xc2b2_ae3d_27d4_eb4f);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Roll a float in [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Roll an integer in [low, high], both ends inclusive.
    pub fn int_inclusive(&mut self, low: i64, high: i64) -> i64 {
        assert!(high >= low, "empty range {low}..={high}");
        let span = (high - low) as u64 + 1;
        low + self.next_u64_below(span) as i64
    }

    /// Pick one element of a non-empty slice uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }
}

/// Hands out dataset RNGs for one session, indexed by stable slot.
#[derive(Debug, Clone)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// The stream for `slot` at refresh `epoch` (0 = first generation).
    pub fn for_dataset(&self, slot: DatasetSlot, epoch: u64) -> DatasetRng {
        DatasetRng::new(self.master_seed, slot as u64, epoch).with_name(slot.name())
    }
}

/// Stable dataset slot assignments.
/// NEVER reorder or remove entries. Only append.
/// Reordering changes every dataset's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u64)]
pub enum DatasetSlot {
    Clients = 0,
    Ledger = 1,
    Payouts = 2,
}

impl DatasetSlot {
    pub const ALL: [DatasetSlot; 3] = [Self::Clients, Self::Ledger, Self::Payouts];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Ledger => "ledger",
            Self::Payouts => "payouts",
        }
    }
}
