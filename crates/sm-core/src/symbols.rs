//! Symbol definitions and the ordered symbol set

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A displayable slot value (an emoji or the decimal text of a number)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from its display text
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Symbol for a numeric slot value
    pub fn number(value: u32) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors raised while building a symbol set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolSetError {
    #[error("Symbol set needs at least 2 symbols, got {0}")]
    TooFew(usize),

    #[error("Symbol {0} appears more than once")]
    Duplicate(Symbol),
}

/// Ordered collection of distinct symbols, fixed once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSet {
    values: Vec<Symbol>,
}

impl SymbolSet {
    /// Minimum number of symbols a set may hold
    pub const MIN_LEN: usize = 2;

    /// Build a set from ordered, distinct symbols
    pub fn new(values: Vec<Symbol>) -> Result<Self, SymbolSetError> {
        if values.len() < Self::MIN_LEN {
            return Err(SymbolSetError::TooFew(values.len()));
        }
        for (i, symbol) in values.iter().enumerate() {
            if values[..i].contains(symbol) {
                return Err(SymbolSetError::Duplicate(symbol.clone()));
            }
        }
        Ok(Self { values })
    }

    /// Build a set of numeric symbols
    pub fn from_numbers(numbers: &[u32]) -> Result<Self, SymbolSetError> {
        Self::new(numbers.iter().copied().map(Symbol::number).collect())
    }

    pub fn values(&self) -> &[Symbol] {
        &self.values
    }

    /// Number of symbols (M)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.values.get(index)
    }

    pub fn index_of(&self, symbol: &Symbol) -> Option<usize> {
        self.values.iter().position(|s| s == symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Index `delta` steps away from `index`, wrapping in both directions
    pub fn offset_index(&self, index: usize, delta: isize) -> usize {
        let len = self.values.len() as isize;
        (index as isize + delta).rem_euclid(len) as usize
    }

    /// Symbol `delta` steps away from `index`, wrapping in both directions
    pub fn offset(&self, index: usize, delta: isize) -> &Symbol {
        &self.values[self.offset_index(index, delta)]
    }

    /// Draw a uniformly random symbol index
    pub fn draw<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn digits() -> SymbolSet {
        SymbolSet::from_numbers(&(0..10).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_rejects_short_set() {
        assert_eq!(
            SymbolSet::new(vec![Symbol::from("🍒")]),
            Err(SymbolSetError::TooFew(1))
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = SymbolSet::new(vec!["🍒".into(), "🍋".into(), "🍒".into()]);
        assert_eq!(result, Err(SymbolSetError::Duplicate("🍒".into())));
    }

    #[test]
    fn test_offset_wraps() {
        let set = digits();
        assert_eq!(set.offset(9, 1).as_str(), "0");
        assert_eq!(set.offset(9, -1).as_str(), "8");
        assert_eq!(set.offset(0, 1).as_str(), "1");
        assert_eq!(set.offset(0, -1).as_str(), "9");
    }

    #[test]
    fn test_index_of() {
        let set = digits();
        assert_eq!(set.index_of(&Symbol::number(7)), Some(7));
        assert_eq!(set.index_of(&Symbol::from("x")), None);
        assert!(set.contains(&Symbol::number(0)));
        assert!(!set.contains(&Symbol::number(10)));
    }

    #[test]
    fn test_draw_covers_every_symbol() {
        let set = SymbolSet::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[set.draw(&mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
