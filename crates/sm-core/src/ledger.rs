//! Money ledger and the closed-form probability model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;

/// Jackpot refinement of a regular win
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackpotRule {
    pub enabled: bool,
    /// Value all main slots must show
    pub symbol: Symbol,
    /// Prize multiplier applied to the win prize
    pub multiplier: i64,
}

/// Player balance plus the fixed pay parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: i64,
    pull_cost: i64,
    win_prize: i64,
    jackpot: JackpotRule,
}

impl Ledger {
    pub fn new(balance: i64, pull_cost: i64, win_prize: i64, jackpot: JackpotRule) -> Self {
        Self {
            balance,
            pull_cost,
            win_prize,
            jackpot,
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn pull_cost(&self) -> i64 {
        self.pull_cost
    }

    pub fn win_prize(&self) -> i64 {
        self.win_prize
    }

    pub fn jackpot(&self) -> &JackpotRule {
        &self.jackpot
    }

    pub fn jackpot_enabled(&self) -> bool {
        self.jackpot.enabled
    }

    /// Prize paid when the jackpot symbol lines up, capped at `i64::MAX`
    pub fn jackpot_prize(&self) -> i64 {
        self.win_prize.saturating_mul(self.jackpot.multiplier)
    }

    /// Whether a winning row on `symbol` is a jackpot
    pub fn is_jackpot_symbol(&self, symbol: &Symbol) -> bool {
        self.jackpot.enabled && &self.jackpot.symbol == symbol
    }

    pub fn increase(&mut self, amount: i64) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn decrease(&mut self, amount: i64) {
        self.balance = self.balance.saturating_sub(amount);
    }

    /// Balance can no longer cover a pull
    pub fn is_low(&self) -> bool {
        self.balance < self.pull_cost
    }

    /// Odds and expected return for `symbol_count` symbols on `slot_count` slots
    pub fn odds(&self, symbol_count: usize, slot_count: usize) -> Odds {
        Odds::compute(symbol_count, slot_count, self)
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money: ${}", self.balance)
    }
}

/// Closed-form win probabilities and expected return of one pull
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    /// All main slots show the jackpot symbol: 1 / M^N
    pub jackpot_chance: f64,
    /// All main slots match on any symbol: M / M^N
    pub win_chance: f64,
    /// Wins that are not jackpots
    pub regular_win_chance: f64,
    /// Expected payout per pull
    pub expected_return: f64,
    /// Expected payout as a percentage of the pull cost
    pub rtp: f64,
}

impl Odds {
    /// Compute the odds table; pure function of its inputs
    pub fn compute(symbol_count: usize, slot_count: usize, ledger: &Ledger) -> Self {
        let m = symbol_count as f64;
        let total = m.powi(slot_count as i32);

        let jackpot_chance = 1.0 / total;
        let win_chance = m / total;
        let win_prize = ledger.win_prize as f64;

        let (regular_win_chance, expected_return) = if ledger.jackpot.enabled {
            let regular = win_chance - jackpot_chance;
            let jackpot_prize = win_prize * ledger.jackpot.multiplier as f64;
            (regular, regular * win_prize + jackpot_chance * jackpot_prize)
        } else {
            (win_chance, win_chance * win_prize)
        };

        let rtp = expected_return / ledger.pull_cost as f64 * 100.0;

        Self {
            jackpot_chance,
            win_chance,
            regular_win_chance,
            expected_return,
            rtp,
        }
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Win chance:         {:.6} (1 in {:.1})", self.win_chance, 1.0 / self.win_chance)?;
        writeln!(f, "Regular win chance: {:.6}", self.regular_win_chance)?;
        writeln!(
            f,
            "Jackpot chance:     {:.6} (1 in {:.1})",
            self.jackpot_chance,
            1.0 / self.jackpot_chance
        )?;
        writeln!(f, "Expected return:    {:.4}", self.expected_return)?;
        write!(f, "RTP:                {:.2}%", self.rtp)
    }
}
