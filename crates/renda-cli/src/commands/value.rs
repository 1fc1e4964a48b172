//! Value command: one instrument on one date.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use renda_bonds::indices::fetch_snapshot;
use renda_bonds::pricing::{Diagnostics, ValuationEngine, ValuationRecord};
use renda_bonds::tax::{net_of_tax, TaxBreakdown};
use serde::Serialize;

use super::{describe, load_instrument, open_calendar, open_repository, parse_date_or_today};
use crate::cli::OutputFormat;
use crate::output::{
    format_number, format_optional, format_percent, print_header, print_single, print_table_pairs,
    KeyValue,
};
use crate::settings::Settings;

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Instrument: a JSON or YAML file, or inline JSON
    #[arg(short, long)]
    pub instrument: String,

    /// Valuation date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Index data directory (overrides the settings file)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Business day calendar
    #[arg(long)]
    pub calendar: Option<String>,

    /// Show the pricing trace
    #[arg(long)]
    pub diagnostics: bool,

    /// Show the value net of income tax, taking the entry price as invested
    #[arg(long)]
    pub tax: bool,
}

#[derive(Serialize)]
struct ValueOutput<'a> {
    instrument: String,
    #[serde(flatten)]
    record: ValuationRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax: Option<TaxBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a Diagnostics>,
}

/// Executes the value command.
pub fn execute(args: ValueArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let instrument = load_instrument(&args.instrument)?;
    let asof = parse_date_or_today(args.date.as_deref())?;
    let calendar = open_calendar(args.calendar.as_deref(), settings)?;
    let repository = open_repository(args.data.as_deref(), settings)?;

    tracing::debug!(instrument = %describe(&instrument), %asof, "valuing");
    let snapshot = fetch_snapshot(&repository, &calendar, &instrument, asof)?;
    let engine = ValuationEngine::new(&calendar).with_settings(settings.engine);
    let result = engine.value(&instrument, asof, &snapshot)?;
    let record = result.record(asof);

    let tax = args.tax.then(|| {
        let (invested, from) = instrument.entry().map_or_else(
            || (instrument.face_value(), instrument.issue_date()),
            |entry| (entry.price, entry.date),
        );
        net_of_tax(&instrument, result.dirty_price(), invested, from, asof)
    });

    let precision = settings.output.precision;
    match format {
        OutputFormat::Json => {
            let output = ValueOutput {
                instrument: describe(&instrument),
                record,
                tax,
                diagnostics: args.diagnostics.then(|| result.diagnostics()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            print_header(&format!("{} on {}", describe(&instrument), asof));
            let mut pairs = vec![
                KeyValue::new("Clean Price", format_number(record.clean_price, precision)),
                KeyValue::new("Accrued", format_number(record.accrued, precision)),
                KeyValue::new("Dirty Price", format_number(record.dirty_price, precision)),
                KeyValue::new("YTM", format_percent(record.ytm)),
                KeyValue::new("Duration", format_optional(record.duration, precision)),
                KeyValue::new("Convexity", format_optional(record.convexity, precision)),
            ];
            if let Some(tax) = &tax {
                pairs.push(KeyValue::new("Holding Days", tax.holding_days.to_string()));
                pairs.push(KeyValue::new("Tax Rate", format_percent(Some(tax.rate))));
                pairs.push(KeyValue::new("Tax", format_number(tax.tax, precision)));
                pairs.push(KeyValue::new("Net Value", format_number(tax.net_value, precision)));
            }
            print_table_pairs(&pairs)?;

            if args.diagnostics {
                print_header("Diagnostics");
                print_table_pairs(&diagnostic_pairs(result.diagnostics(), precision)?)?;
            }
        }
        OutputFormat::Csv | OutputFormat::Minimal => {
            print_single(
                &record,
                &format_number(record.dirty_price, precision),
                format,
            )?;
        }
    }

    Ok(())
}

/// Flattens the pricing trace into rows; nested values print as JSON.
fn diagnostic_pairs(diagnostics: &Diagnostics, precision: usize) -> Result<Vec<KeyValue>> {
    let value = serde_json::to_value(diagnostics)?;
    let Some(fields) = value.as_object() else {
        return Ok(Vec::new());
    };

    Ok(fields
        .iter()
        .map(|(key, value)| {
            let shown = match value {
                serde_json::Value::Number(n) if n.is_f64() => {
                    n.as_f64().map_or_else(|| n.to_string(), |v| format_number(v, precision))
                }
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => "-".to_string(),
                other => other.to_string(),
            };
            KeyValue::new(key.clone(), shown)
        })
        .collect())
}
