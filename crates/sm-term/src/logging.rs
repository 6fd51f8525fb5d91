//! Session log file

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use sm_core::LoggingSettings;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `<directory>/log_YYYYMMDD_HHMMSS.log` for a session started at `started`
pub fn log_file_path(directory: &Path, started: DateTime<Local>) -> PathBuf {
    directory.join(format!("log_{}.log", started.format("%Y%m%d_%H%M%S")))
}

/// Install the file logger.
///
/// Returns the log file path, or `None` when logging is disabled. `RUST_LOG`
/// still overrides the configured level.
pub fn init(settings: &LoggingSettings) -> Result<Option<PathBuf>> {
    if !settings.enabled {
        return Ok(None);
    }

    fs::create_dir_all(&settings.directory).with_context(|| {
        format!(
            "Failed to create log directory {}",
            settings.directory.display()
        )
    })?;
    let path = log_file_path(&settings.directory, Local::now());
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let mut builder = Builder::new();
    builder
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never);

    if settings.detailed {
        builder.filter_level(LevelFilter::Debug).format(|buf, record| {
            writeln!(
                buf,
                "{} - {:<5} [{}:{}] {}",
                Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                record.args()
            )
        });
    } else {
        builder.filter_level(LevelFilter::Info).format(|buf, record| {
            writeln!(
                buf,
                "{} - {}",
                Local::now().format(TIMESTAMP_FORMAT),
                record.args()
            )
        });
    }

    builder.parse_default_env();
    builder.try_init().context("Logger already installed")?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let path = log_file_path(Path::new("logs"), started);
        assert_eq!(path, Path::new("logs").join("log_20240309_070501.log"));
    }

    #[test]
    fn test_disabled_installs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LoggingSettings {
            enabled: false,
            directory: dir.path().join("logs"),
            detailed: false,
        };
        assert!(init(&settings).unwrap().is_none());
        assert!(!settings.directory.exists());
    }
}
