//! Running session statistics

use serde::{Deserialize, Serialize};

use crate::machine::Outcome;

/// Counters accumulated over completed pulls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub pulls: u64,
    pub wins: u64,
    pub jackpots: u64,
    pub losses: u64,
    pub total_wagered: i64,
    pub total_paid: i64,
    pub biggest_net_win: i64,
}

impl SessionStats {
    /// Record one settled pull
    pub fn record(&mut self, outcome: &Outcome, wagered: i64, paid: i64) {
        self.pulls += 1;
        self.total_wagered = self.total_wagered.saturating_add(wagered);
        self.total_paid = self.total_paid.saturating_add(paid);

        match outcome {
            Outcome::Lose => self.losses += 1,
            Outcome::Win { .. } => self.wins += 1,
            Outcome::Jackpot { .. } => {
                self.wins += 1;
                self.jackpots += 1;
            }
        }

        self.biggest_net_win = self.biggest_net_win.max(paid.saturating_sub(wagered));
    }

    /// Observed return to player, in percent
    pub fn rtp(&self) -> f64 {
        if self.total_wagered > 0 {
            (self.total_paid as f64 / self.total_wagered as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Percentage of pulls that won anything
    pub fn hit_rate(&self) -> f64 {
        if self.pulls > 0 {
            (self.wins as f64 / self.pulls as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Net result for the player over the session
    pub fn net(&self) -> i64 {
        self.total_paid.saturating_sub(self.total_wagered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol;

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::default();
        assert_eq!(stats.rtp(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_record_outcomes() {
        let mut stats = SessionStats::default();
        stats.record(&Outcome::Lose, 50, 0);
        stats.record(&Outcome::Win { symbol: Symbol::from("🍒") }, 50, 700);
        stats.record(&Outcome::Jackpot { symbol: Symbol::from("🎰") }, 50, 11900);
        stats.record(&Outcome::Lose, 50, 0);

        assert_eq!(stats.pulls, 4);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.jackpots, 1);
        assert_eq!(stats.losses, 2);
        assert_eq!(stats.biggest_net_win, 11850);
        assert_eq!(stats.net(), 12600 - 200);
        assert_eq!(stats.hit_rate(), 50.0);
        assert_eq!(stats.rtp(), 12600.0 / 200.0 * 100.0);
    }

    #[test]
    fn test_totals_saturate() {
        let mut stats = SessionStats::default();
        let jackpot = Outcome::Jackpot { symbol: Symbol::from("🎰") };
        stats.record(&jackpot, 50, i64::MAX);
        stats.record(&jackpot, 50, i64::MAX);
        assert_eq!(stats.total_paid, i64::MAX);
        assert_eq!(stats.biggest_net_win, i64::MAX - 50);
        assert_eq!(stats.net(), i64::MAX - 100);
    }
}
