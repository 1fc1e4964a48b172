//! Series command: one instrument on every business day of a range.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use renda_bonds::pricing::{value_series, SeriesPoint, ValuationEngine, ValuationResult};
use renda_core::Date;
use serde::Serialize;
use tabled::Tabled;

use super::{check_range, load_instrument, open_calendar, open_repository, parse_date};
use crate::cli::OutputFormat;
use crate::output::{format_optional, format_percent, print_output, print_warning, TableRow};
use crate::settings::Settings;

/// Arguments for the series command.
#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Instrument: a JSON or YAML file, or inline JSON
    #[arg(short, long)]
    pub instrument: String,

    /// First date (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Last date (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,

    /// Index data directory (overrides the settings file)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Business day calendar
    #[arg(long)]
    pub calendar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeriesRecord {
    date: Date,
    clean_price: Option<f64>,
    accrued: Option<f64>,
    dirty_price: Option<f64>,
    ytm: Option<f64>,
    duration: Option<f64>,
    convexity: Option<f64>,
    error: Option<String>,
}

impl From<&SeriesPoint> for SeriesRecord {
    fn from(point: &SeriesPoint) -> Self {
        let ok = point.result.as_ref().ok();
        Self {
            date: point.date,
            clean_price: ok.map(ValuationResult::clean_price),
            accrued: ok.map(ValuationResult::accrued),
            dirty_price: ok.map(ValuationResult::dirty_price),
            ytm: ok.and_then(ValuationResult::ytm),
            duration: ok.and_then(ValuationResult::duration),
            convexity: ok.and_then(ValuationResult::convexity),
            error: point.result.as_ref().err().map(ToString::to_string),
        }
    }
}

#[derive(Tabled)]
pub struct SeriesRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Clean")]
    clean_price: String,
    #[tabled(rename = "Accrued")]
    accrued: String,
    #[tabled(rename = "Dirty")]
    dirty_price: String,
    #[tabled(rename = "YTM")]
    ytm: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
}

impl TableRow for SeriesRecord {
    type Row = SeriesRow;

    fn row(&self, precision: usize) -> SeriesRow {
        match &self.error {
            Some(error) => SeriesRow {
                date: self.date.to_string(),
                clean_price: error.clone(),
                accrued: "-".to_string(),
                dirty_price: "-".to_string(),
                ytm: "-".to_string(),
                duration: "-".to_string(),
                convexity: "-".to_string(),
            },
            None => SeriesRow {
                date: self.date.to_string(),
                clean_price: format_optional(self.clean_price, precision),
                accrued: format_optional(self.accrued, precision),
                dirty_price: format_optional(self.dirty_price, precision),
                ytm: format_percent(self.ytm),
                duration: format_optional(self.duration, precision),
                convexity: format_optional(self.convexity, precision),
            },
        }
    }

    fn minimal(&self, precision: usize) -> String {
        format!("{} {}", self.date, format_optional(self.dirty_price, precision))
    }
}

/// Executes the series command.
pub fn execute(args: SeriesArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let instrument = load_instrument(&args.instrument)?;
    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;
    check_range(from, to)?;

    let calendar = open_calendar(args.calendar.as_deref(), settings)?;
    let repository = open_repository(args.data.as_deref(), settings)?;
    let engine = ValuationEngine::new(&calendar).with_settings(settings.engine);

    let points = value_series(&engine, &repository, &instrument, from, to)?;
    let records: Vec<SeriesRecord> = points.iter().map(SeriesRecord::from).collect();

    let failed = records.iter().filter(|r| r.error.is_some()).count();
    print_output(&records, format, settings.output.precision)?;
    if failed > 0 {
        print_warning(&format!("{failed} of {} dates failed", records.len()));
    }

    Ok(())
}
