//! Headless batch simulation
//!
//! Runs many pulls against a [`NullPresenter`] and reports the observed
//! statistics next to the closed-form odds, so the configured RTP can be
//! checked empirically.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, MachineConfig};
use crate::ledger::Odds;
use crate::machine::Machine;
use crate::presenter::NullPresenter;
use crate::stats::SessionStats;

/// Result of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub symbol_count: usize,
    pub slot_count: usize,
    pub odds: Odds,
    pub stats: SessionStats,
    pub final_balance: i64,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} pulls on {} slots with {} symbols",
            self.stats.pulls, self.slot_count, self.symbol_count
        )?;
        writeln!(
            f,
            "Wins: {} ({} jackpots), losses: {}",
            self.stats.wins, self.stats.jackpots, self.stats.losses
        )?;
        writeln!(
            f,
            "Hit rate: {:.3}% (expected {:.3}%)",
            self.stats.hit_rate(),
            self.odds.win_chance * 100.0
        )?;
        writeln!(
            f,
            "RTP: {:.2}% (expected {:.2}%)",
            self.stats.rtp(),
            self.odds.rtp
        )?;
        write!(f, "Final balance: ${}", self.final_balance)
    }
}

/// Run `pulls` pulls; a seed makes the run reproducible
pub fn simulate(
    config: &MachineConfig,
    pulls: u64,
    seed: Option<u64>,
) -> Result<SimulationReport, ConfigError> {
    let mut machine = match seed {
        Some(s) => Machine::with_seed(config, s)?,
        None => Machine::from_config(config)?,
    };
    let mut presenter = NullPresenter;

    for _ in 0..pulls {
        machine.pull(&mut presenter);
    }

    let report = SimulationReport {
        symbol_count: machine.symbols().len(),
        slot_count: machine.row().len(),
        odds: machine.odds(),
        stats: machine.stats().clone(),
        final_balance: machine.ledger().balance(),
    };

    info!(
        "Simulation finished: {} pulls, observed RTP {:.2}%, expected {:.2}%",
        pulls,
        report.stats.rtp(),
        report.odds.rtp
    );

    Ok(report)
}
