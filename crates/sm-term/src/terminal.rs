//! Terminal presenter
//!
//! Scrolling output: the row block is redrawn in place while a pull animates
//! (when ANSI output is enabled), everything else is appended below it.

use std::io::Write;
use std::thread;
use std::time::Duration;

use log::warn;

use sm_core::{
    ControlSettings, DisplaySettings, Ledger, Message, Odds, Presenter, RowSnapshot, SessionStats,
    Symbol,
};

/// Lines taken by one rendered row: border, top, main, bottom, border
const ROW_BLOCK_LINES: usize = 5;

/// Terminal columns per slot cell
const CELL_WIDTH: usize = 6;

const MAIN_COLOR: &str = "1;31";
const SECONDARY_COLOR: &str = "33";
const LOW_MONEY_COLOR: &str = "1;31";
const TEXT_COLOR: &str = "1";

pub struct TerminalPresenter<W: Write> {
    out: W,
    color: bool,
    frame_delay: Duration,
    controls: ControlSettings,
    /// The row block is the last thing on screen and may be overwritten
    row_on_screen: bool,
    instructions_visible: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, display: &DisplaySettings, controls: &ControlSettings) -> Self {
        Self {
            out,
            color: display.color,
            frame_delay: Duration::from_millis(display.frame_delay_ms),
            controls: controls.clone(),
            row_on_screen: false,
            instructions_visible: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Session summary printed on exit
    pub fn show_summary(&mut self, stats: &SessionStats, ledger: &Ledger) {
        self.emit(&format!(
            "Pulls: {}  Wins: {}  Jackpots: {}  Hit rate: {:.1}%  RTP: {:.1}%",
            stats.pulls,
            stats.wins,
            stats.jackpots,
            stats.hit_rate(),
            stats.rtp()
        ));
        self.emit(&format!("Final balance: ${}. Thanks for playing!", ledger.balance()));
    }

    fn write_raw(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Terminal write failed: {e}");
        }
    }

    fn emit(&mut self, line: &str) {
        self.row_on_screen = false;
        self.write_raw(&format!("{line}\n"));
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn cells(&self, values: &[Option<Symbol>], code: &str) -> String {
        let cells: Vec<String> = values
            .iter()
            .map(|v| {
                let text = v.as_ref().map(Symbol::as_str).unwrap_or("");
                self.paint(&center(text, CELL_WIDTH), code)
            })
            .collect();
        format!("|{}|", cells.join("|"))
    }

    fn row_block(&self, row: &RowSnapshot) -> String {
        let border = format!("+{}+", vec!["-".repeat(CELL_WIDTH); row.len()].join("+"));
        [
            border.clone(),
            self.cells(&row.top, SECONDARY_COLOR),
            self.cells(&row.main, MAIN_COLOR),
            self.cells(&row.bottom, SECONDARY_COLOR),
            border,
        ]
        .join("\n")
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, row: &RowSnapshot) {
        let mut frame = String::new();
        if self.color && self.row_on_screen {
            // Cursor up over the previous block, then clear to end of screen
            frame.push_str(&format!("\x1b[{ROW_BLOCK_LINES}A\x1b[J"));
        }
        frame.push_str(&self.row_block(row));
        frame.push('\n');
        self.write_raw(&frame);
        self.row_on_screen = true;

        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }

    fn show_balance(&mut self, ledger: &Ledger) {
        let code = if ledger.is_low() { LOW_MONEY_COLOR } else { TEXT_COLOR };
        let line = self.paint(&ledger.to_string(), code);
        self.emit(&line);
    }

    fn show_message(&mut self, message: &Message) {
        let line = self.paint(&message.to_string(), TEXT_COLOR);
        self.emit(&line);
    }

    fn clear_message(&mut self) {
        // Old messages scroll away
    }

    fn show_instructions(&mut self) {
        if self.instructions_visible {
            return;
        }
        let pull = format!("Press ENTER or '{}' to pull!", self.controls.pull);
        let exit = format!("Type '{}' to exit the game.", self.controls.exit);
        self.emit(&pull);
        self.emit(&exit);
        self.instructions_visible = true;
    }

    fn hide_instructions(&mut self) {
        self.instructions_visible = false;
    }

    fn show_paytable(&mut self, ledger: &Ledger, odds: &Odds) {
        self.emit(&format!(
            "Pull cost: ${}    Win prize: ${}",
            ledger.pull_cost(),
            ledger.win_prize()
        ));
        let jackpot = ledger.jackpot();
        if jackpot.enabled {
            self.emit(&format!(
                "Jackpot: {}    Jackpot multiplier: x{}",
                jackpot.symbol, jackpot.multiplier
            ));
        } else {
            self.emit("JACKPOT DISABLED");
        }
        self.emit(&format!("RTP: {:.2}%", odds.rtp));
    }
}

/// Center `text` in `width` terminal columns
fn center(text: &str, width: usize) -> String {
    let used = display_width(text);
    let pad = width.saturating_sub(used);
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

/// Rough column count: pictographs take two columns
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| match c as u32 {
            0x1F000..=0x1FAFF | 0x2600..=0x27BF => 2,
            _ => 1,
        })
        .sum()
}
