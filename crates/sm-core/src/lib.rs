//! # sm-core: Slot Machine core
//!
//! A row of independently randomized slots, a plain all-match win rule with a
//! jackpot refinement, a money ledger and the closed-form odds behind it.
//! Rendering is left to a [`Presenter`] supplied by the front-end.
//!
//! ## Architecture
//!
//! ```text
//! MachineConfig (YAML / JSON, validated)
//!     │
//!     v
//! Machine ── Idle / Pulling
//!     │
//!     ├── SymbolSet (ordered, distinct symbols)
//!     ├── Row (main slots + secondary top/bottom slots)
//!     ├── Ledger (balance, pull cost, prizes) ──> Odds (RTP)
//!     └── SessionStats
//!           │
//!           v
//!     pull() ──> frames ──> Presenter
//!            └─> PullReport
//! ```

pub mod config;
pub mod ledger;
pub mod machine;
pub mod presenter;
pub mod row;
pub mod simulate;
pub mod slot;
pub mod stats;
pub mod symbols;

pub use config::*;
pub use ledger::*;
pub use machine::*;
pub use presenter::*;
pub use row::*;
pub use simulate::*;
pub use slot::*;
pub use stats::*;
pub use symbols::*;
