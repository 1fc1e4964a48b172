//! CSV-backed [`IndexerRepository`].

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use renda_bonds::error::BondResult;
use renda_bonds::indices::{DailyRates, IndexerRepository, MonthlyIndex};
use renda_core::{Date, YearMonth};

use crate::error::{FileError, FileResult};

/// CDI file name inside a data directory.
pub const CDI_FILE: &str = "cdi.csv";
/// SELIC file name inside a data directory.
pub const SELIC_FILE: &str = "selic.csv";
/// IPCA file name inside a data directory.
pub const IPCA_FILE: &str = "ipca.csv";

#[derive(Debug, Deserialize)]
struct DailyRecord {
    date: Date,
    rate: f64,
}

#[derive(Debug, Deserialize)]
struct MonthlyRecord {
    year_month: YearMonth,
    index: f64,
}

fn read_records<T, F>(path: &Path, mut insert: F) -> FileResult<usize>
where
    T: for<'de> Deserialize<'de>,
    F: FnMut(T),
{
    if !path.exists() {
        debug!("{} not found; using an empty series", path.display());
        return Ok(0);
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|e| FileError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut count = 0;
    for result in reader.deserialize() {
        let record: T = result.map_err(|e| FileError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        insert(record);
        count += 1;
    }
    Ok(count)
}

/// Loads a `date,rate` file.
pub fn load_daily_rates(path: impl AsRef<Path>) -> FileResult<DailyRates> {
    let mut rates = DailyRates::new();
    read_records(path.as_ref(), |record: DailyRecord| {
        rates.insert(record.date, record.rate);
    })?;
    Ok(rates)
}

/// Loads a `year_month,index` file.
pub fn load_monthly_index(path: impl AsRef<Path>) -> FileResult<MonthlyIndex> {
    let mut index = MonthlyIndex::new();
    read_records(path.as_ref(), |record: MonthlyRecord| {
        index.insert(record.year_month, record.index);
    })?;
    Ok(index)
}

/// Index data loaded from CSV files.
#[derive(Debug, Clone, Default)]
pub struct FileIndexerRepository {
    cdi: DailyRates,
    selic: DailyRates,
    ipca: MonthlyIndex,
    source: Option<PathBuf>,
}

impl FileIndexerRepository {
    /// Loads `cdi.csv`, `selic.csv` and `ipca.csv` from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> FileResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(FileError::NotADirectory(dir.to_path_buf()));
        }

        let repository = Self {
            cdi: load_daily_rates(dir.join(CDI_FILE))?,
            selic: load_daily_rates(dir.join(SELIC_FILE))?,
            ipca: load_monthly_index(dir.join(IPCA_FILE))?,
            source: Some(dir.to_path_buf()),
        };
        info!(
            "loaded {} CDI, {} SELIC and {} IPCA records from {}",
            repository.cdi.len(),
            repository.selic.len(),
            repository.ipca.len(),
            dir.display()
        );
        Ok(repository)
    }

    /// Builds a repository from explicit files; `None` leaves a series empty.
    pub fn from_files(
        cdi: Option<&Path>,
        selic: Option<&Path>,
        ipca: Option<&Path>,
    ) -> FileResult<Self> {
        Ok(Self {
            cdi: cdi.map(|path| load_daily_rates(path)).transpose()?.unwrap_or_default(),
            selic: selic.map(|path| load_daily_rates(path)).transpose()?.unwrap_or_default(),
            ipca: ipca.map(|path| load_monthly_index(path)).transpose()?.unwrap_or_default(),
            source: None,
        })
    }

    /// Directory the data was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of records per series: (CDI, SELIC, IPCA).
    pub fn len(&self) -> (usize, usize, usize) {
        (self.cdi.len(), self.selic.len(), self.ipca.len())
    }

    /// Returns true if no series has data.
    pub fn is_empty(&self) -> bool {
        self.cdi.is_empty() && self.selic.is_empty() && self.ipca.is_empty()
    }
}

fn range(rates: &DailyRates, start: Date, end: Date) -> DailyRates {
    if end < start {
        return DailyRates::new();
    }
    rates
        .range(start..=end)
        .map(|(date, rate)| (*date, *rate))
        .collect()
}

impl IndexerRepository for FileIndexerRepository {
    fn cdi_daily(&self, start: Date, end: Date) -> BondResult<DailyRates> {
        Ok(range(&self.cdi, start, end))
    }

    fn selic_daily(&self, start: Date, end: Date) -> BondResult<DailyRates> {
        Ok(range(&self.selic, start, end))
    }

    fn ipca_number_index(&self) -> BondResult<MonthlyIndex> {
        Ok(self.ipca.clone())
    }
}
