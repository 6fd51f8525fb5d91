//! Machine configuration
//!
//! Loaded once at start-up from YAML or JSON, every field defaulted. All
//! constraint violations are collected and reported together so a broken
//! file can be fixed in one pass.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ledger::{JackpotRule, Ledger};
use crate::symbols::{Symbol, SymbolSet};

/// Upper bound for `max_pull_cycles`
pub const MAX_PULL_CYCLES_LIMIT: u32 = 100;

/// Minimum number of main slots
pub const MIN_SLOT_COUNT: usize = 2;

/// Maximum number of main slots
pub const MAX_SLOT_COUNT: usize = 10;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Row and animation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Number of main slots (N)
    pub slot_count: usize,
    /// Fewest animation frames per pull
    pub min_pull_cycles: u32,
    /// Most animation frames per pull
    pub max_pull_cycles: u32,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            slot_count: 3,
            min_pull_cycles: 10,
            max_pull_cycles: 20,
        }
    }
}

/// Symbol families; `use_symbols` picks the active one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolSettings {
    pub use_symbols: bool,
    /// Single-codepoint emoji; avoid sequences such as keycaps
    pub symbols: Vec<String>,
    pub numbers: Vec<u32>,
}

impl Default for SymbolSettings {
    fn default() -> Self {
        Self {
            use_symbols: true,
            symbols: ["🍒", "🍋", "🍊", "🍇", "🔔", "💎", "🎰"]
                .into_iter()
                .map(String::from)
                .collect(),
            numbers: (0..10).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneySettings {
    pub starting_balance: i64,
    pub pull_cost: i64,
    pub win_prize: i64,
}

impl Default for MoneySettings {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
            pull_cost: 50,
            win_prize: 700,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JackpotSettings {
    pub enabled: bool,
    /// Jackpot value when symbols are in use
    pub symbol: String,
    /// Jackpot value when numbers are in use
    pub number: u32,
    pub multiplier: i64,
}

impl Default for JackpotSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            symbol: "🎰".to_string(),
            number: 7,
            multiplier: 17,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Pause after each animation frame
    pub frame_delay_ms: u64,
    /// ANSI colors and in-place redraw
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            frame_delay_ms: 60,
            color: true,
        }
    }
}

/// Input bindings; an empty input line always pulls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub pull: String,
    pub exit: String,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            pull: "p".to_string(),
            exit: "q".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Directory receiving `log_YYYYMMDD_HHMMSS.log`
    pub directory: PathBuf,
    /// Include level, module and line; log every animation frame
    pub detailed: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("logs"),
            detailed: false,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub machine: MachineSettings,
    pub symbols: SymbolSettings,
    pub money: MoneySettings,
    pub jackpot: JackpotSettings,
    pub display: DisplaySettings,
    pub controls: ControlSettings,
    pub logging: LoggingSettings,
}

impl MachineConfig {
    /// Load and validate a config file; the format follows the extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without validating
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Parse JSON without validating
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Check every constraint, reporting all violations at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(violations))
        }
    }

    /// All violated constraints, empty when the config is usable
    pub fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let machine = &self.machine;
        let money = &self.money;
        let jackpot = &self.jackpot;
        let symbols = &self.symbols;

        if machine.slot_count < MIN_SLOT_COUNT {
            errors.push(format!("slot_count must be at least {MIN_SLOT_COUNT}."));
        }
        if machine.slot_count > MAX_SLOT_COUNT {
            errors.push(format!("slot_count must not be greater than {MAX_SLOT_COUNT}."));
        }
        if machine.min_pull_cycles < 1 {
            errors.push("min_pull_cycles must be at least 1.".to_string());
        }
        if machine.max_pull_cycles > MAX_PULL_CYCLES_LIMIT {
            errors.push(format!(
                "max_pull_cycles must not be greater than {MAX_PULL_CYCLES_LIMIT}."
            ));
        }
        if machine.min_pull_cycles > machine.max_pull_cycles {
            errors.push("min_pull_cycles must not be greater than max_pull_cycles.".to_string());
        }

        if money.pull_cost < 1 {
            errors.push("pull_cost must be at least 1.".to_string());
        }
        match money.pull_cost.checked_mul(2) {
            Some(min_prize) if money.win_prize >= min_prize => {}
            Some(_) => {
                errors.push("win_prize must be at least twice as big as pull_cost.".to_string())
            }
            None => errors.push("pull_cost is too large.".to_string()),
        }
        if jackpot.multiplier < 1 {
            errors.push("jackpot multiplier must be at least 1.".to_string());
        } else if money.win_prize.checked_mul(jackpot.multiplier).is_none() {
            errors.push("jackpot prize (win_prize x multiplier) is too large.".to_string());
        }

        for (i, symbol) in symbols.symbols.iter().enumerate() {
            if symbol.chars().count() != 1 {
                errors.push(format!(
                    "Symbol at index {i} ({symbol}) is not a single Unicode character."
                ));
            }
        }

        let active_len = if symbols.use_symbols {
            symbols.symbols.len()
        } else {
            symbols.numbers.len()
        };
        if active_len < SymbolSet::MIN_LEN {
            errors.push(format!(
                "The active symbol set needs at least {} values, got {active_len}.",
                SymbolSet::MIN_LEN
            ));
        }
        if let Some(dup) = first_duplicate(&symbols.symbols) {
            errors.push(format!("Symbol {dup} appears more than once."));
        }
        if let Some(dup) = first_duplicate(&symbols.numbers) {
            errors.push(format!("Number {dup} appears more than once."));
        }

        if !symbols.symbols.contains(&jackpot.symbol) {
            errors.push(format!(
                "Jackpot symbol {} is not included in slot symbols: {:?}.",
                jackpot.symbol, symbols.symbols
            ));
        }
        if !symbols.numbers.contains(&jackpot.number) {
            errors.push(format!(
                "Jackpot number {} is not included in slot numbers: {:?}.",
                jackpot.number, symbols.numbers
            ));
        }

        let pull_key = self.controls.pull.trim();
        let exit_key = self.controls.exit.trim();
        if exit_key.is_empty() {
            errors.push("The exit control must not be empty.".to_string());
        } else if pull_key.eq_ignore_ascii_case(exit_key) {
            errors.push("Pull and exit controls must differ.".to_string());
        }

        errors
    }

    /// The active symbol family, in order
    pub fn active_symbols(&self) -> Vec<Symbol> {
        if self.symbols.use_symbols {
            self.symbols.symbols.iter().map(Symbol::new).collect()
        } else {
            self.symbols.numbers.iter().copied().map(Symbol::number).collect()
        }
    }

    /// The jackpot value for the active family
    pub fn jackpot_symbol(&self) -> Symbol {
        if self.symbols.use_symbols {
            Symbol::new(self.jackpot.symbol.clone())
        } else {
            Symbol::number(self.jackpot.number)
        }
    }

    /// Build the symbol set for the active family
    pub fn symbol_set(&self) -> Result<SymbolSet, ConfigError> {
        SymbolSet::new(self.active_symbols()).map_err(|e| ConfigError::Invalid(vec![e.to_string()]))
    }

    /// Build a ledger holding the starting balance
    pub fn ledger(&self) -> Ledger {
        Ledger::new(
            self.money.starting_balance,
            self.money.pull_cost,
            self.money.win_prize,
            JackpotRule {
                enabled: self.jackpot.enabled,
                symbol: self.jackpot_symbol(),
                multiplier: self.jackpot.multiplier,
            },
        )
    }
}

fn first_duplicate<T: PartialEq>(values: &[T]) -> Option<&T> {
    values
        .iter()
        .enumerate()
        .find(|(i, v)| values[..*i].contains(*v))
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MachineConfig::default();
        assert!(config.violations().is_empty(), "{:?}", config.violations());
    }

    #[test]
    fn test_collects_every_violation() {
        let mut config = MachineConfig::default();
        config.machine.slot_count = 1;
        config.machine.min_pull_cycles = 0;
        config.machine.max_pull_cycles = 101;
        config.money.win_prize = 60;
        config.jackpot.symbol = "⭐".to_string();

        let violations = config.violations();
        assert_eq!(violations.len(), 5, "{violations:#?}");
        assert!(violations[0].contains("slot_count"));
        assert!(violations.iter().any(|v| v.contains("min_pull_cycles must be at least 1")));
        assert!(violations.iter().any(|v| v.contains("max_pull_cycles")));
        assert!(violations.iter().any(|v| v.contains("win_prize")));
        assert!(violations.iter().any(|v| v.contains("Jackpot symbol ⭐")));
    }

    #[test]
    fn test_min_above_max() {
        let mut config = MachineConfig::default();
        config.machine.min_pull_cycles = 30;
        config.machine.max_pull_cycles = 20;
        let violations = config.violations();
        assert_eq!(
            violations,
            vec!["min_pull_cycles must not be greater than max_pull_cycles.".to_string()]
        );
    }

    #[test]
    fn test_multi_codepoint_symbol_rejected() {
        let mut config = MachineConfig::default();
        config.symbols.symbols.push("7️⃣".to_string());
        let violations = config.violations();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("Symbol at index 7"));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let mut config = MachineConfig::default();
        config.symbols.symbols.push("🍒".to_string());
        assert!(config
            .violations()
            .iter()
            .any(|v| v == "Symbol 🍒 appears more than once."));
    }

    #[test]
    fn test_jackpot_number_checked() {
        let mut config = MachineConfig::default();
        config.jackpot.number = 42;
        let violations = config.violations();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("Jackpot number 42"));
    }

    #[test]
    fn test_controls_must_differ() {
        let mut config = MachineConfig::default();
        config.controls.exit = "P".to_string();
        assert_eq!(config.violations(), vec!["Pull and exit controls must differ.".to_string()]);
    }

    #[test]
    fn test_slot_count_upper_bound() {
        let mut config = MachineConfig::default();
        config.machine.slot_count = MAX_SLOT_COUNT;
        assert!(config.violations().is_empty());

        config.machine.slot_count = MAX_SLOT_COUNT + 1;
        assert_eq!(
            config.violations(),
            vec![format!("slot_count must not be greater than {MAX_SLOT_COUNT}.")]
        );
    }

    #[test]
    fn test_pull_cycle_limit_is_inclusive() {
        let mut config = MachineConfig::default();
        config.machine.max_pull_cycles = MAX_PULL_CYCLES_LIMIT;
        assert!(config.violations().is_empty());

        config.machine.max_pull_cycles = MAX_PULL_CYCLES_LIMIT + 1;
        assert_eq!(
            config.violations(),
            vec![format!("max_pull_cycles must not be greater than {MAX_PULL_CYCLES_LIMIT}.")]
        );
    }

    #[test]
    fn test_smallest_machine_is_valid() {
        let mut config = MachineConfig::default();
        config.machine.slot_count = MIN_SLOT_COUNT;
        config.symbols.symbols = vec!["🍒".to_string(), "🎰".to_string()];
        assert!(config.violations().is_empty(), "{:?}", config.violations());
        assert_eq!(config.symbol_set().unwrap().len(), 2);
    }

    #[test]
    fn test_huge_pull_cost_is_reported() {
        let mut config = MachineConfig::default();
        config.money.pull_cost = i64::MAX / 2 + 1;
        config.money.win_prize = i64::MAX;
        let violations = config.violations();
        assert!(violations.contains(&"pull_cost is too large.".to_string()), "{violations:?}");
    }

    #[test]
    fn test_jackpot_prize_overflow_is_reported() {
        let mut config = MachineConfig::default();
        config.money.win_prize = i64::MAX / 4;
        config.jackpot.multiplier = 17;
        assert_eq!(
            config.violations(),
            vec!["jackpot prize (win_prize x multiplier) is too large.".to_string()]
        );

        config.jackpot.enabled = false;
        assert_eq!(config.violations().len(), 1);
    }

    #[test]
    fn test_invalid_error_lists_all_lines() {
        let err = ConfigError::Invalid(vec!["first.".into(), "second.".into()]);
        assert_eq!(err.to_string(), "first.\nsecond.");
    }

    #[test]
    fn test_numbers_mode() {
        let mut config = MachineConfig::default();
        config.symbols.use_symbols = false;
        let set = config.symbol_set().unwrap();
        assert_eq!(set.len(), 10);
        assert_eq!(config.jackpot_symbol(), Symbol::number(7));
        assert_eq!(config.ledger().jackpot().symbol, Symbol::number(7));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = MachineConfig::from_yaml_str("money:\n  pull_cost: 10\n  win_prize: 20\n").unwrap();
        assert_eq!(config.money.pull_cost, 10);
        assert_eq!(config.money.starting_balance, 1000);
        assert_eq!(config.machine, MachineSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = MachineConfig::default().to_yaml().unwrap();
        assert_eq!(MachineConfig::from_yaml_str(&yaml).unwrap(), MachineConfig::default());
    }
}
