//! Presentation boundary
//!
//! The machine never draws anything itself. It drives a [`Presenter`] handed
//! in by the caller: one `render` per animation frame, then the outcome
//! message, balance and instructions once the pull settles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ledger::{Ledger, Odds};
use crate::row::RowSnapshot;

/// Outcome text shown after a pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Regular win, net of the pull cost
    Won { net: i64 },
    /// Jackpot win, net of the pull cost
    Jackpot { net: i64 },
    /// Lost the pull cost
    Lost { cost: i64 },
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Won { net } => write!(f, "You won {net}!"),
            Message::Jackpot { net } => write!(f, "JACKPOT! You won {net}!"),
            Message::Lost { cost } => write!(f, "You lost {cost}!"),
        }
    }
}

/// Output surface driven by the machine
pub trait Presenter {
    /// Draw the current row (called once per animation frame)
    fn render(&mut self, row: &RowSnapshot);

    /// Draw the balance; `ledger.is_low()` flags a balance below the pull cost
    fn show_balance(&mut self, ledger: &Ledger);

    fn show_message(&mut self, message: &Message);

    fn clear_message(&mut self);

    fn show_instructions(&mut self);

    fn hide_instructions(&mut self);

    /// Pull cost, win prize and jackpot info; drawn once at start-up
    fn show_paytable(&mut self, _ledger: &Ledger, _odds: &Odds) {}
}

/// Presenter that discards everything (batch simulation)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _row: &RowSnapshot) {}
    fn show_balance(&mut self, _ledger: &Ledger) {}
    fn show_message(&mut self, _message: &Message) {}
    fn clear_message(&mut self) {}
    fn show_instructions(&mut self) {}
    fn hide_instructions(&mut self) {}
}

/// One call received by a [`RecordingPresenter`]
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Render(RowSnapshot),
    Balance { balance: i64, low: bool },
    Message(Message),
    ClearMessage,
    ShowInstructions,
    HideInstructions,
    Paytable { rtp: f64 },
}

/// Presenter that keeps every call, for headless callers and tests
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PresenterEvent::Render(_)))
            .count()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::Message(m) => Some(m),
            _ => None,
        })
    }

    pub fn last_frame(&self) -> Option<&RowSnapshot> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::Render(row) => Some(row),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, row: &RowSnapshot) {
        self.events.push(PresenterEvent::Render(row.clone()));
    }

    fn show_balance(&mut self, ledger: &Ledger) {
        self.events.push(PresenterEvent::Balance {
            balance: ledger.balance(),
            low: ledger.is_low(),
        });
    }

    fn show_message(&mut self, message: &Message) {
        self.events.push(PresenterEvent::Message(*message));
    }

    fn clear_message(&mut self) {
        self.events.push(PresenterEvent::ClearMessage);
    }

    fn show_instructions(&mut self) {
        self.events.push(PresenterEvent::ShowInstructions);
    }

    fn hide_instructions(&mut self) {
        self.events.push(PresenterEvent::HideInstructions);
    }

    fn show_paytable(&mut self, _ledger: &Ledger, odds: &Odds) {
        self.events.push(PresenterEvent::Paytable { rtp: odds.rtp });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text() {
        assert_eq!(Message::Won { net: 650 }.to_string(), "You won 650!");
        assert_eq!(
            Message::Jackpot { net: 11850 }.to_string(),
            "JACKPOT! You won 11850!"
        );
        assert_eq!(Message::Lost { cost: 50 }.to_string(), "You lost 50!");
    }
}
