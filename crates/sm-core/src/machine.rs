//! Slot machine: pull cycle and outcome evaluation

use log::{debug, info};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, MachineConfig};
use crate::ledger::{Ledger, Odds};
use crate::presenter::{Message, Presenter};
use crate::row::{Row, RowSnapshot};
use crate::slot::SlotError;
use crate::stats::SessionStats;
use crate::symbols::{Symbol, SymbolSet};

/// Machine state; a pull request while `Pulling` is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MachineState {
    #[default]
    Idle,
    Pulling,
}

/// Result of evaluating the terminal row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Lose,
    Win { symbol: Symbol },
    Jackpot { symbol: Symbol },
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        !matches!(self, Outcome::Lose)
    }

    pub fn is_jackpot(&self) -> bool {
        matches!(self, Outcome::Jackpot { .. })
    }
}

/// Everything a completed pull produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullReport {
    /// 1-based pull counter for this machine
    pub pull_number: u64,
    /// Animation frames rendered before settling
    pub cycles: u32,
    /// Row the machine settled on
    pub terminal: RowSnapshot,
    pub outcome: Outcome,
    /// Gross amount paid out (0 on a loss)
    pub award: i64,
    /// Net balance change including the pull cost
    pub balance_change: i64,
    pub balance_after: i64,
}

/// Answer to a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullResult {
    Completed(PullReport),
    /// The machine was already pulling
    Ignored,
}

impl PullResult {
    pub fn report(&self) -> Option<&PullReport> {
        match self {
            PullResult::Completed(report) => Some(report),
            PullResult::Ignored => None,
        }
    }
}

/// Resets the machine to `Idle` on every exit path, unwinding included
struct PullGuard<'a> {
    state: &'a mut MachineState,
}

impl<'a> PullGuard<'a> {
    fn enter(state: &'a mut MachineState) -> Self {
        *state = MachineState::Pulling;
        Self { state }
    }
}

impl Drop for PullGuard<'_> {
    fn drop(&mut self) {
        *self.state = MachineState::Idle;
        debug!("Pull sequence completed");
    }
}

/// Slot machine
///
/// Owns the symbol set, the row of slots, the ledger and the RNG. Every
/// mutation happens inside [`Machine::pull`] on the caller's thread.
pub struct Machine {
    state: MachineState,
    cabinet: Cabinet,
}

/// Everything the pull cycle mutates, kept apart from the state flag
struct Cabinet {
    symbols: SymbolSet,
    row: Row,
    ledger: Ledger,
    min_cycles: u32,
    max_cycles: u32,
    rng: ChaCha8Rng,
    stats: SessionStats,
}

impl Machine {
    /// Validate `config` and build a machine seeded from the OS
    pub fn from_config(config: &MachineConfig) -> Result<Self, ConfigError> {
        Self::build(config, ChaCha8Rng::from_os_rng())
    }

    /// Validate `config` and build a machine with a reproducible RNG
    pub fn with_seed(config: &MachineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(config: &MachineConfig, mut rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let symbols = config.symbol_set()?;
        let row = Row::new(config.machine.slot_count, &symbols, &mut rng);

        info!(
            "Machine created: {} slots, {} symbols, {}-{} cycles per pull",
            config.machine.slot_count,
            symbols.len(),
            config.machine.min_pull_cycles,
            config.machine.max_pull_cycles
        );

        Ok(Self {
            state: MachineState::Idle,
            cabinet: Cabinet {
                symbols,
                row,
                ledger: config.ledger(),
                min_cycles: config.machine.min_pull_cycles,
                max_cycles: config.machine.max_pull_cycles,
                rng,
                stats: SessionStats::default(),
            },
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == MachineState::Pulling
    }

    pub fn symbols(&self) -> &SymbolSet {
        &self.cabinet.symbols
    }

    pub fn row(&self) -> &Row {
        &self.cabinet.row
    }

    pub fn ledger(&self) -> &Ledger {
        &self.cabinet.ledger
    }

    pub fn stats(&self) -> &SessionStats {
        &self.cabinet.stats
    }

    pub fn snapshot(&self) -> RowSnapshot {
        self.cabinet.row.snapshot(&self.cabinet.symbols)
    }

    /// Closed-form odds for this machine's symbol and slot counts
    pub fn odds(&self) -> Odds {
        self.cabinet
            .ledger
            .odds(self.cabinet.symbols.len(), self.cabinet.row.len())
    }

    /// True iff every main slot shows the same value
    pub fn check_winning(&self) -> bool {
        self.cabinet.row.check_win()
    }

    /// True iff the row is a win on the enabled jackpot value
    pub fn check_jackpot(&self) -> bool {
        self.cabinet.evaluate().is_jackpot()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PULL CYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Draw the initial screen: secondary slots, row, paytable, balance, instructions
    pub fn start(&mut self, presenter: &mut dyn Presenter) {
        let cabinet = &mut self.cabinet;
        cabinet.row.sync_secondary(&cabinet.symbols);
        presenter.render(&cabinet.row.snapshot(&cabinet.symbols));
        let odds = cabinet.ledger.odds(cabinet.symbols.len(), cabinet.row.len());
        presenter.show_paytable(&cabinet.ledger, &odds);
        presenter.show_balance(&cabinet.ledger);
        presenter.show_instructions();
        info!("Slot machine started, RTP {:.2}%", odds.rtp);
    }

    /// Run one full pull: animate, settle, pay out, present
    pub fn pull(&mut self, presenter: &mut dyn Presenter) -> PullResult {
        self.pull_with(presenter, None)
    }

    /// Like [`Machine::pull`], but the row settles on `terminal`
    ///
    /// The terminal values are checked before anything changes.
    pub fn pull_forced(
        &mut self,
        terminal: &[Symbol],
        presenter: &mut dyn Presenter,
    ) -> Result<PullResult, SlotError> {
        let indices = self.cabinet.row.resolve(&self.cabinet.symbols, terminal)?;
        Ok(self.pull_with(presenter, Some(&indices)))
    }

    fn pull_with(&mut self, presenter: &mut dyn Presenter, forced: Option<&[usize]>) -> PullResult {
        if self.state == MachineState::Pulling {
            debug!("Pull attempted while machine is still processing");
            return PullResult::Ignored;
        }

        let _guard = PullGuard::enter(&mut self.state);
        PullResult::Completed(self.cabinet.run(presenter, forced))
    }
}

impl Cabinet {
    fn run(&mut self, presenter: &mut dyn Presenter, forced: Option<&[usize]>) -> PullReport {
        let pull_cost = self.ledger.pull_cost();
        self.ledger.decrease(pull_cost);

        let cycles = self.rng.random_range(self.min_cycles..=self.max_cycles);
        let pull_number = self.stats.pulls + 1;
        info!(
            "Pull #{pull_number} started: {cycles} cycles, cost {pull_cost}, jackpot {}",
            if self.ledger.jackpot_enabled() { "enabled" } else { "disabled" }
        );

        presenter.hide_instructions();
        presenter.clear_message();

        for cycle in 1..=cycles {
            match forced {
                Some(indices) if cycle == cycles => self.row.place_main(indices),
                _ => self.row.randomize_main(&self.symbols, &mut self.rng),
            }
            self.row.sync_secondary(&self.symbols);
            presenter.render(&self.row.snapshot(&self.symbols));
            debug!("Pull cycle {cycle}/{cycles} completed");
        }

        let terminal = self.row.snapshot(&self.symbols);
        let outcome = self.evaluate();
        let award = match outcome {
            Outcome::Lose => 0,
            Outcome::Win { .. } => self.ledger.win_prize(),
            Outcome::Jackpot { .. } => self.ledger.jackpot_prize(),
        };
        self.ledger.increase(award);
        let net = award.saturating_sub(pull_cost);

        let message = match outcome {
            Outcome::Lose => Message::Lost { cost: pull_cost },
            Outcome::Win { .. } => Message::Won { net },
            Outcome::Jackpot { .. } => Message::Jackpot { net },
        };
        match &outcome {
            Outcome::Lose => info!("Player lost. Cost: ${pull_cost}. Row: {terminal}"),
            Outcome::Win { symbol } => info!("Player won on {symbol}! Prize: ${net}"),
            Outcome::Jackpot { symbol } => info!("Player won a jackpot on {symbol}! Prize: ${net}"),
        }

        self.stats.record(&outcome, pull_cost, award);

        presenter.show_message(&message);
        presenter.show_balance(&self.ledger);
        presenter.show_instructions();

        PullReport {
            pull_number,
            cycles,
            terminal,
            outcome,
            award,
            balance_change: net,
            balance_after: self.ledger.balance(),
        }
    }

    fn evaluate(&self) -> Outcome {
        let Some(index) = self.row.common_index() else {
            debug!("No match found");
            return Outcome::Lose;
        };
        let symbol = self.symbols.values()[index].clone();
        if self.ledger.is_jackpot_symbol(&symbol) {
            Outcome::Jackpot { symbol }
        } else {
            Outcome::Win { symbol }
        }
    }
}
