//! Gold accounts and per-tick accrual.
//!
//! Balances only ever change in two places: tick accrual (here) and the
//! deduction inside a successful build. Spending is checked, so a balance
//! can never go negative - the counter is unsigned by construction.

use serde::{Deserialize, Serialize};

use crate::config::FactionTuning;
use crate::factions::Faction;
use crate::grid::{BarracksKind, Grid};

/// A faction's gold balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoldAccount {
    balance: u32,
}

impl GoldAccount {
    /// Create an account with a starting balance.
    #[must_use]
    pub const fn new(balance: u32) -> Self {
        Self { balance }
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> u32 {
        self.balance
    }

    /// Add gold to the account.
    pub fn earn(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Check if the account covers a cost.
    #[must_use]
    pub const fn can_afford(&self, cost: u32) -> bool {
        self.balance >= cost
    }

    /// Deduct a cost if the balance covers it.
    ///
    /// Returns `true` if the transaction succeeded; on `false` the balance
    /// is untouched.
    pub fn spend(&mut self, cost: u32) -> bool {
        if self.balance >= cost {
            self.balance -= cost;
            true
        } else {
            false
        }
    }
}

/// Gold gained by one faction in one tick.
///
/// Base accrual plus the per-mine bonus. Reads the grid, never writes it.
#[must_use]
pub fn accrual(grid: &Grid, tuning: &FactionTuning, faction: Faction) -> u32 {
    let mines = grid.barracks_count(faction, BarracksKind::Mine);
    tuning.base_gold_per_tick + mines * tuning.mine_gold_per_tick
}
