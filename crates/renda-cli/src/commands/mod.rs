//! CLI command implementations.

pub mod batch;
pub mod calendar;
pub mod config;
pub mod series;
pub mod value;

pub use batch::BatchArgs;
pub use calendar::CalendarArgs;
pub use config::ConfigArgs;
pub use series::SeriesArgs;
pub use value::ValueArgs;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use renda_bonds::instruments::Instrument;
use renda_core::calendars::{calendar_by_name, Calendar};
use renda_core::Date;
use renda_ext_file::FileIndexerRepository;
use serde::de::DeserializeOwned;

use crate::error::{CliError, CliResult};
use crate::settings::Settings;

/// Parses a date string in YYYY-MM-DD format; `today` is accepted.
pub fn parse_date(s: &str) -> CliResult<Date> {
    if s.eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date, defaulting to today.
pub fn parse_date_or_today(s: Option<&str>) -> CliResult<Date> {
    s.map_or_else(|| Ok(today()), parse_date)
}

fn today() -> Date {
    Date::from(chrono::Local::now().date_naive())
}

/// Reads a JSON or YAML document; `.yaml`/`.yml` files are parsed as YAML.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parsed = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| {
        CliError::Parse {
            source_name: path.display().to_string(),
            message,
        }
        .into()
    })
}

/// Loads an instrument from a file or from inline JSON.
pub fn load_instrument(arg: &str) -> Result<Instrument> {
    if arg.trim_start().starts_with('{') {
        return serde_json::from_str(arg).map_err(|e| {
            CliError::Parse {
                source_name: "inline JSON".to_string(),
                message: e.to_string(),
            }
            .into()
        });
    }
    read_document(Path::new(arg))
}

/// Opens the index data directory: `--data` first, then the settings.
///
/// With neither, every series is empty; PRE instruments still value.
pub fn open_repository(data: Option<&Path>, settings: &Settings) -> Result<FileIndexerRepository> {
    match data.or(settings.data.dir.as_deref()) {
        Some(dir) => Ok(FileIndexerRepository::from_dir(dir)?),
        None => {
            tracing::debug!("no index data directory configured");
            Ok(FileIndexerRepository::from_files(None, None, None)?)
        }
    }
}

/// Resolves the calendar: `--calendar` first, then the settings.
pub fn open_calendar(name: Option<&str>, settings: &Settings) -> Result<Box<dyn Calendar>> {
    let name = name.unwrap_or(&settings.data.calendar);
    Ok(calendar_by_name(name)?)
}

/// Checks `from <= to`.
pub fn check_range(from: Date, to: Date) -> CliResult<()> {
    if from > to {
        return Err(CliError::InvalidRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok(())
}

/// Short description such as `CDB CDI 110`.
pub fn describe(instrument: &Instrument) -> String {
    format!(
        "{} {} {}",
        instrument.kind(),
        instrument.indexer(),
        instrument.rate()
    )
}
