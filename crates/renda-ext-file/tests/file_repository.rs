use std::fs;

use renda_bonds::indices::IndexerRepository;
use renda_core::{Date, YearMonth};
use renda_ext_file::{FileError, FileIndexerRepository};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

#[test]
fn loads_all_series() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("cdi.csv"),
        "date,rate\n2024-01-02,0.043739\n2024-01-03,0.043739\n2024-01-04, 0.043739\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("ipca.csv"),
        "# IBGE number index\nyear_month,index\n202312,6794.62\n2024-01,6823.83\n",
    )
    .unwrap();

    let repo = FileIndexerRepository::from_dir(dir.path()).unwrap();
    assert_eq!(repo.len(), (3, 0, 2));
    assert_eq!(repo.source(), Some(dir.path()));

    let cdi = repo.cdi_daily(d(2024, 1, 3), d(2024, 1, 31)).unwrap();
    assert_eq!(cdi.len(), 2);
    assert_eq!(cdi.get(&d(2024, 1, 4)), Some(&0.043739));

    let ipca = repo.ipca_number_index().unwrap();
    assert_eq!(ipca.get(&YearMonth::new(2024, 1).unwrap()), Some(&6823.83));
    assert!(repo.selic_daily(d(2024, 1, 1), d(2024, 12, 31)).unwrap().is_empty());
}

#[test]
fn empty_directory_gives_empty_repository() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileIndexerRepository::from_dir(dir.path()).unwrap();
    assert!(repo.is_empty());
}

#[test]
fn bad_records_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("selic.csv"), "date,rate\n2024-13-01,0.04\n").unwrap();
    let err = FileIndexerRepository::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, FileError::Parse { .. }));
    assert!(err.to_string().contains("selic.csv"));
}

#[test]
fn missing_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileIndexerRepository::from_dir(dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, FileError::NotADirectory(_)));
}
