//! Batch command: many (instrument, date) pairs from one file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use renda_bonds::error::BondResult;
use renda_bonds::pricing::{value_batch, ValuationEngine, ValuationRequest, ValuationResult};
use renda_core::Date;
use serde::Serialize;
use tabled::Tabled;

use super::{describe, open_calendar, open_repository, read_document};
use crate::cli::OutputFormat;
use crate::output::{format_optional, format_percent, print_output, print_warning, TableRow};
use crate::settings::Settings;

/// Arguments for the batch command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON or YAML list of `{instrument, date}` entries
    #[arg(short, long)]
    pub input: PathBuf,

    /// Index data directory (overrides the settings file)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Business day calendar
    #[arg(long)]
    pub calendar: Option<String>,
}

/// One line of batch output; failed entries carry the error instead of numbers.
#[derive(Debug, Serialize)]
pub struct BatchRecord {
    position: usize,
    instrument: String,
    date: Date,
    clean_price: Option<f64>,
    accrued: Option<f64>,
    dirty_price: Option<f64>,
    ytm: Option<f64>,
    duration: Option<f64>,
    convexity: Option<f64>,
    error: Option<String>,
}

impl BatchRecord {
    fn new(position: usize, request: &ValuationRequest, result: &BondResult<ValuationResult>) -> Self {
        let ok = result.as_ref().ok();
        Self {
            position,
            instrument: describe(&request.instrument),
            date: request.date,
            clean_price: ok.map(ValuationResult::clean_price),
            accrued: ok.map(ValuationResult::accrued),
            dirty_price: ok.map(ValuationResult::dirty_price),
            ytm: ok.and_then(ValuationResult::ytm),
            duration: ok.and_then(ValuationResult::duration),
            convexity: ok.and_then(ValuationResult::convexity),
            error: result.as_ref().err().map(ToString::to_string),
        }
    }
}

#[derive(Tabled)]
pub struct BatchRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Instrument")]
    instrument: String,
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
    #[tabled(rename = "Status")]
    status: String,
}

impl TableRow for BatchRecord {
    type Row = BatchRow;

    fn row(&self, precision: usize) -> BatchRow {
        BatchRow {
            position: self.position,
            instrument: self.instrument.clone(),
            date: self.date.to_string(),
            clean_price: format_optional(self.clean_price, precision),
            accrued: format_optional(self.accrued, precision),
            dirty_price: format_optional(self.dirty_price, precision),
            ytm: format_percent(self.ytm),
            duration: format_optional(self.duration, precision),
            status: self.error.clone().unwrap_or_else(|| "ok".to_string()),
        }
    }

    fn minimal(&self, precision: usize) -> String {
        match &self.error {
            Some(error) => format!("error: {error}"),
            None => format_optional(self.dirty_price, precision),
        }
    }
}

/// Executes the batch command.
pub fn execute(args: BatchArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let requests: Vec<ValuationRequest> = read_document(&args.input)?;
    let calendar = open_calendar(args.calendar.as_deref(), settings)?;
    let repository = open_repository(args.data.as_deref(), settings)?;
    let engine = ValuationEngine::new(&calendar).with_settings(settings.engine);

    tracing::debug!(count = requests.len(), "valuing batch");
    let results = value_batch(&engine, &repository, &requests);

    let records: Vec<BatchRecord> = requests
        .iter()
        .zip(&results)
        .enumerate()
        .map(|(i, (request, result))| BatchRecord::new(i + 1, request, result))
        .collect();

    let failed = records.iter().filter(|r| r.error.is_some()).count();
    print_output(&records, format, settings.output.precision)?;
    if failed > 0 {
        print_warning(&format!("{failed} of {} valuations failed", records.len()));
    }

    Ok(())
}
