//! Calendar command: business day queries.

use anyhow::Result;
use clap::{Args, Subcommand};
use renda_core::Date;
use serde::Serialize;

use super::{check_range, open_calendar, parse_date};
use crate::cli::OutputFormat;
use crate::output::{print_single, print_table_pairs, KeyValue};
use crate::settings::Settings;

/// Arguments for the calendar command.
#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Calendar name (ANBIMA, WEEKEND)
    #[arg(long)]
    pub calendar: Option<String>,

    #[command(subcommand)]
    pub command: CalendarCommand,
}

/// Calendar queries.
#[derive(Subcommand, Debug)]
pub enum CalendarCommand {
    /// Is the date a business day?
    IsBusinessDay {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Business days between two dates (start excluded, end included)
    Count {
        /// Start date
        from: String,
        /// End date
        to: String,
        /// Include the start date as well
        #[arg(long)]
        inclusive: bool,
    },

    /// Shift a date by a number of business days
    Add {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Business days, negative to go back
        #[arg(allow_hyphen_values = true)]
        days: i32,
    },

    /// List business days in a range, both ends included
    List {
        /// Start date
        from: String,
        /// End date
        to: String,
    },

    /// First business day on or after a date
    Next {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Last business day on or before a date
    Previous {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Business days in a calendar year
    Year {
        /// Year
        year: i32,
    },
}

#[derive(Serialize)]
struct Answer<T: Serialize> {
    calendar: &'static str,
    query: &'static str,
    input: String,
    result: T,
}

/// Executes the calendar command.
pub fn execute(args: CalendarArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let calendar = open_calendar(args.calendar.as_deref(), settings)?;
    let name = calendar.name();

    match args.command {
        CalendarCommand::IsBusinessDay { date } => {
            let date = parse_date(&date)?;
            let result = calendar.is_business_day(date);
            answer(name, "is-business-day", date.to_string(), result, format)
        }
        CalendarCommand::Count { from, to, inclusive } => {
            let from = parse_date(&from)?;
            let to = parse_date(&to)?;
            let result = if inclusive {
                check_range(from, to)?;
                calendar.business_day_list(from, to).len() as i64
            } else {
                calendar.count_business_days(from, to)
            };
            answer(name, "count", format!("{from}..{to}"), result, format)
        }
        CalendarCommand::Add { date, days } => {
            let date = parse_date(&date)?;
            let result = calendar.add_business_days(date, days);
            answer(name, "add", format!("{date} {days:+}"), result, format)
        }
        CalendarCommand::Next { date } => {
            let date = parse_date(&date)?;
            let result = calendar.next_business_day(date);
            answer(name, "next", date.to_string(), result, format)
        }
        CalendarCommand::Previous { date } => {
            let date = parse_date(&date)?;
            let result = calendar.previous_business_day(date);
            answer(name, "previous", date.to_string(), result, format)
        }
        CalendarCommand::Year { year } => {
            let result = calendar.business_days_in_year(year)?;
            answer(name, "year", year.to_string(), result, format)
        }
        CalendarCommand::List { from, to } => {
            let from = parse_date(&from)?;
            let to = parse_date(&to)?;
            check_range(from, to)?;
            list(name, calendar.business_day_list(from, to), format)
        }
    }
}

fn answer<T>(
    calendar: &'static str,
    query: &'static str,
    input: String,
    result: T,
    format: OutputFormat,
) -> Result<()>
where
    T: Serialize + ToString,
{
    let shown = result.to_string();
    if format == OutputFormat::Table {
        return print_table_pairs(&[
            KeyValue::new("Calendar", calendar),
            KeyValue::new("Query", query),
            KeyValue::new("Input", input),
            KeyValue::new("Result", shown),
        ]);
    }

    let answer = Answer {
        calendar,
        query,
        input,
        result,
    };
    print_single(&answer, &shown, format)
}

fn list(calendar: &'static str, days: Vec<Date>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&Answer {
                    calendar,
                    query: "list",
                    input: String::new(),
                    result: days,
                })?
            );
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["date"])?;
            for day in &days {
                wtr.write_record([day.to_string()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Table | OutputFormat::Minimal => {
            for day in &days {
                println!("{day}");
            }
        }
    }
    Ok(())
}
