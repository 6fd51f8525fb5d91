//! Individual slots: randomized main slots and derived secondary slots

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::symbols::{Symbol, SymbolSet};

/// Where a slot sits in its column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotRole {
    /// Independently randomized, decides the outcome
    Main,
    /// Decorative slot above a main slot (next symbol on the strip)
    SecondaryTop,
    /// Decorative slot below a main slot (previous symbol on the strip)
    SecondaryBottom,
}

impl SlotRole {
    /// Strip offset relative to the main slot in the same column
    pub fn offset(self) -> isize {
        match self {
            SlotRole::Main => 0,
            SlotRole::SecondaryTop => 1,
            SlotRole::SecondaryBottom => -1,
        }
    }

    pub fn is_main(self) -> bool {
        self == SlotRole::Main
    }
}

/// Contract violations on slot assignment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("Value {0} is not part of the configured symbol set")]
    UnknownSymbol(Symbol),

    #[error("Slot {position} is {role:?}; only main slots are randomized")]
    NotMain { position: usize, role: SlotRole },

    #[error("Slot {position} is a main slot; only secondary slots derive their value")]
    NotSecondary { position: usize },

    #[error("Row has {expected} main slots, got {actual} values")]
    RowLength { expected: usize, actual: usize },
}

/// A single slot holding an index into the symbol set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    position: usize,
    role: SlotRole,
    value: Option<usize>,
}

impl Slot {
    /// Create a main slot with an initial random value
    pub fn main<R: Rng>(position: usize, symbols: &SymbolSet, rng: &mut R) -> Self {
        Self {
            position,
            role: SlotRole::Main,
            value: Some(symbols.draw(rng)),
        }
    }

    /// Create an empty secondary slot
    pub fn secondary(position: usize, role: SlotRole) -> Self {
        debug_assert!(!role.is_main());
        Self {
            position,
            role,
            value: None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn role(&self) -> SlotRole {
        self.role
    }

    /// Current symbol index, `None` for a secondary slot not yet derived
    pub fn index(&self) -> Option<usize> {
        self.value
    }

    /// Current symbol, `None` for a secondary slot not yet derived
    pub fn current<'a>(&self, symbols: &'a SymbolSet) -> Option<&'a Symbol> {
        self.value.and_then(|i| symbols.get(i))
    }

    /// Draw a new value uniformly at random
    pub fn randomize<R: Rng>(&mut self, symbols: &SymbolSet, rng: &mut R) -> Result<usize, SlotError> {
        if !self.role.is_main() {
            return Err(SlotError::NotMain {
                position: self.position,
                role: self.role,
            });
        }
        let index = symbols.draw(rng);
        self.value = Some(index);
        Ok(index)
    }

    /// Set the value from the adjacent main slot's value
    pub fn derive(&mut self, symbols: &SymbolSet, main_value: &Symbol) -> Result<(), SlotError> {
        let main_index = symbols
            .index_of(main_value)
            .ok_or_else(|| SlotError::UnknownSymbol(main_value.clone()))?;
        self.derive_from_index(symbols, main_index)
    }

    pub(crate) fn derive_from_index(&mut self, symbols: &SymbolSet, main_index: usize) -> Result<(), SlotError> {
        if self.role.is_main() {
            return Err(SlotError::NotSecondary {
                position: self.position,
            });
        }
        self.value = Some(symbols.offset_index(main_index, self.role.offset()));
        Ok(())
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.value = Some(index);
    }

    /// Assign an explicit value; rejects anything outside the symbol set
    pub fn set(&mut self, symbols: &SymbolSet, value: &Symbol) -> Result<(), SlotError> {
        let index = symbols
            .index_of(value)
            .ok_or_else(|| SlotError::UnknownSymbol(value.clone()))?;
        self.value = Some(index);
        Ok(())
    }
}
