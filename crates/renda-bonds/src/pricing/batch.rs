//! Batch and time-series valuation.
//!
//! Each item fetches its own snapshot and carries its own `Result`, so one
//! failing instrument does not abort the batch. With the `parallel` feature
//! items are valued on the rayon thread pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use renda_core::calendars::Calendar;
use renda_core::Date;

use super::{ValuationEngine, ValuationResult};
use crate::error::BondResult;
use crate::indices::{fetch_snapshot, IndexerRepository};
use crate::instruments::Instrument;

/// One (instrument, date) pair to value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    /// The instrument.
    pub instrument: Instrument,
    /// Valuation date.
    pub date: Date,
}

/// One point of a valuation series.
#[derive(Debug, Clone)]
pub struct SeriesPoint {
    /// Valuation date.
    pub date: Date,
    /// Result for that date.
    pub result: BondResult<ValuationResult>,
}

fn value_one<C, R>(
    engine: &ValuationEngine<'_, C>,
    repository: &R,
    request: &ValuationRequest,
) -> BondResult<ValuationResult>
where
    C: Calendar,
    R: IndexerRepository + ?Sized,
{
    let snapshot = fetch_snapshot(repository, engine.calendar(), &request.instrument, request.date)?;
    engine.value(&request.instrument, request.date, &snapshot)
}

/// Values every request, preserving order.
pub fn value_batch<C, R>(
    engine: &ValuationEngine<'_, C>,
    repository: &R,
    requests: &[ValuationRequest],
) -> Vec<BondResult<ValuationResult>>
where
    C: Calendar,
    R: IndexerRepository + ?Sized,
{
    #[cfg(feature = "parallel")]
    {
        requests
            .par_iter()
            .map(|request| value_one(engine, repository, request))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        requests
            .iter()
            .map(|request| value_one(engine, repository, request))
            .collect()
    }
}

/// Values one instrument on every business day in `[from, to]`.
///
/// The snapshot is fetched once, for `to`; it covers every earlier date.
pub fn value_series<C, R>(
    engine: &ValuationEngine<'_, C>,
    repository: &R,
    instrument: &Instrument,
    from: Date,
    to: Date,
) -> BondResult<Vec<SeriesPoint>>
where
    C: Calendar,
    R: IndexerRepository + ?Sized,
{
    let snapshot = fetch_snapshot(repository, engine.calendar(), instrument, to)?;
    let dates = engine.calendar().business_day_list(from, to);

    let point = |date: &Date| SeriesPoint {
        date: *date,
        result: engine.value(instrument, *date, &snapshot),
    };

    #[cfg(feature = "parallel")]
    let points: Vec<SeriesPoint> = dates.par_iter().map(point).collect();
    #[cfg(not(feature = "parallel"))]
    let points: Vec<SeriesPoint> = dates.iter().map(point).collect();

    Ok(points)
}
