//! The row of main slots with their secondary companions

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::slot::{Slot, SlotError, SlotRole};
use crate::symbols::{Symbol, SymbolSet};

/// N main slots, each with one slot above and one below
#[derive(Debug, Clone)]
pub struct Row {
    main: Vec<Slot>,
    top: Vec<Slot>,
    bottom: Vec<Slot>,
}

impl Row {
    /// Create a row with randomly drawn main slots and empty secondaries
    pub fn new<R: Rng>(slot_count: usize, symbols: &SymbolSet, rng: &mut R) -> Self {
        Self {
            main: (0..slot_count).map(|i| Slot::main(i, symbols, rng)).collect(),
            top: (0..slot_count)
                .map(|i| Slot::secondary(i, SlotRole::SecondaryTop))
                .collect(),
            bottom: (0..slot_count)
                .map(|i| Slot::secondary(i, SlotRole::SecondaryBottom))
                .collect(),
        }
    }

    /// Number of main slots (N)
    pub fn len(&self) -> usize {
        self.main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    pub fn main_slots(&self) -> &[Slot] {
        &self.main
    }

    pub fn top_slots(&self) -> &[Slot] {
        &self.top
    }

    pub fn bottom_slots(&self) -> &[Slot] {
        &self.bottom
    }

    /// Randomize every main slot independently
    pub fn randomize_main<R: Rng>(&mut self, symbols: &SymbolSet, rng: &mut R) {
        for slot in &mut self.main {
            // Main slots always accept a draw
            let _ = slot.randomize(symbols, rng);
        }
    }

    /// Re-derive every secondary slot from the main slot in its column
    pub fn sync_secondary(&mut self, symbols: &SymbolSet) {
        for (main, (top, bottom)) in self
            .main
            .iter()
            .zip(self.top.iter_mut().zip(self.bottom.iter_mut()))
        {
            if let Some(index) = main.index() {
                let _ = top.derive_from_index(symbols, index);
                let _ = bottom.derive_from_index(symbols, index);
            }
        }
    }

    /// Resolve a full set of main values into symbol indices
    pub fn resolve(&self, symbols: &SymbolSet, values: &[Symbol]) -> Result<Vec<usize>, SlotError> {
        if values.len() != self.main.len() {
            return Err(SlotError::RowLength {
                expected: self.main.len(),
                actual: values.len(),
            });
        }
        values
            .iter()
            .map(|v| {
                symbols
                    .index_of(v)
                    .ok_or_else(|| SlotError::UnknownSymbol(v.clone()))
            })
            .collect()
    }

    /// Assign every main slot; the row is untouched if any value is rejected
    pub fn set_main(&mut self, symbols: &SymbolSet, values: &[Symbol]) -> Result<(), SlotError> {
        self.resolve(symbols, values)?;
        for (slot, value) in self.main.iter_mut().zip(values) {
            slot.set(symbols, value)?;
        }
        Ok(())
    }

    /// Place indices already checked by [`Row::resolve`]
    pub(crate) fn place_main(&mut self, indices: &[usize]) {
        for (slot, &index) in self.main.iter_mut().zip(indices) {
            slot.set_index(index);
        }
    }

    /// True iff every main slot holds the same value as the first one
    pub fn check_win(&self) -> bool {
        self.common_index().is_some()
    }

    /// The shared symbol index when all main slots match
    pub fn common_index(&self) -> Option<usize> {
        let mut values = self.main.iter().map(Slot::index);
        let first = values.next().flatten()?;
        values.all(|v| v == Some(first)).then_some(first)
    }

    /// Main slot values in order
    pub fn main_symbols<'a>(&self, symbols: &'a SymbolSet) -> Vec<&'a Symbol> {
        self.main.iter().filter_map(|s| s.current(symbols)).collect()
    }

    /// Owned copy of the row, as handed to presenters and reports
    pub fn snapshot(&self, symbols: &SymbolSet) -> RowSnapshot {
        let column = |slots: &[Slot]| {
            slots
                .iter()
                .map(|s| s.current(symbols).cloned())
                .collect::<Vec<_>>()
        };
        RowSnapshot {
            top: column(&self.top),
            main: column(&self.main),
            bottom: column(&self.bottom),
        }
    }
}

/// Displayable state of the row at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub top: Vec<Option<Symbol>>,
    pub main: Vec<Option<Symbol>>,
    pub bottom: Vec<Option<Symbol>>,
}

impl RowSnapshot {
    pub fn len(&self) -> usize {
        self.main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }
}

impl fmt::Display for RowSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<&str> = self
            .main
            .iter()
            .map(|s| s.as_ref().map(Symbol::as_str).unwrap_or("-"))
            .collect();
        write!(f, "[{}]", values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fruit() -> SymbolSet {
        SymbolSet::new(
            ["🍒", "🍋", "🍊", "🍇", "🔔", "💎", "🎰"]
                .into_iter()
                .map(Symbol::from)
                .collect(),
        )
        .unwrap()
    }

    fn row_of(values: &[&str]) -> (Row, SymbolSet) {
        let symbols = fruit();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut row = Row::new(values.len(), &symbols, &mut rng);
        let values: Vec<Symbol> = values.iter().copied().map(Symbol::from).collect();
        row.set_main(&symbols, &values).unwrap();
        (row, symbols)
    }

    #[test]
    fn test_check_win_all_equal() {
        let (row, _) = row_of(&["🔔", "🔔", "🔔"]);
        assert!(row.check_win());
        assert_eq!(row.common_index(), Some(4));
    }

    #[test]
    fn test_check_win_single_mismatch() {
        let (row, _) = row_of(&["🔔", "🔔", "💎"]);
        assert!(!row.check_win());
        let (row, _) = row_of(&["💎", "🔔", "🔔"]);
        assert!(!row.check_win());
    }

    #[test]
    fn test_secondaries_empty_until_synced() {
        let (mut row, symbols) = row_of(&["🍒", "🎰"]);
        assert!(row.snapshot(&symbols).top.iter().all(Option::is_none));

        row.sync_secondary(&symbols);
        let snap = row.snapshot(&symbols);
        assert_eq!(snap.top, vec![Some("🍋".into()), Some("🍒".into())]);
        assert_eq!(snap.bottom, vec![Some("🎰".into()), Some("💎".into())]);
    }

    #[test]
    fn test_set_main_is_all_or_nothing() {
        let (mut row, symbols) = row_of(&["🍒", "🍒", "🍒"]);
        let bad: Vec<Symbol> = vec!["🍋".into(), "7".into(), "🍋".into()];
        assert_eq!(
            row.set_main(&symbols, &bad),
            Err(SlotError::UnknownSymbol("7".into()))
        );
        assert_eq!(row.common_index(), Some(0));

        let short: Vec<Symbol> = vec!["🍋".into()];
        assert_eq!(
            row.set_main(&symbols, &short),
            Err(SlotError::RowLength {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_columns_share_positions() {
        let (row, symbols) = row_of(&["🍒", "🍋", "🍊"]);
        for (i, ((main, top), bottom)) in row
            .main_slots()
            .iter()
            .zip(row.top_slots())
            .zip(row.bottom_slots())
            .enumerate()
        {
            assert_eq!((main.position(), main.role()), (i, SlotRole::Main));
            assert_eq!((top.position(), top.role()), (i, SlotRole::SecondaryTop));
            assert_eq!((bottom.position(), bottom.role()), (i, SlotRole::SecondaryBottom));
        }
        let shown: Vec<&str> = row.main_symbols(&symbols).into_iter().map(Symbol::as_str).collect();
        assert_eq!(shown, ["🍒", "🍋", "🍊"]);
    }

    #[test]
    fn test_snapshot_display() {
        let (row, symbols) = row_of(&["🍒", "🍋", "🍊"]);
        assert_eq!(row.snapshot(&symbols).to_string(), "[🍒, 🍋, 🍊]");
    }
}
