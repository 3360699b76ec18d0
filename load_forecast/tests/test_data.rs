use chrono::{Duration, NaiveDateTime};
use load_forecast::data::{parse_timestamp, DataLoader, Gap, TimeSeries};
use load_forecast::ForecastError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::tempdir;

fn ts(raw: &str) -> NaiveDateTime {
    parse_timestamp(raw).unwrap()
}

fn hours_from(start: &str, offsets: &[i64]) -> Vec<NaiveDateTime> {
    let start = ts(start);
    offsets.iter().map(|h| start + Duration::hours(*h)).collect()
}

#[rstest]
#[case("2018-08-03 23:00:00")]
#[case("2018-08-03T23:00:00")]
#[case("2018-08-03 23:00:00.000")]
#[case("2018-08-03 23:00")]
#[case("  2018-08-03 23:00:00 ")]
fn test_parse_timestamp_layouts(#[case] raw: &str) {
    let expected = chrono::NaiveDate::from_ymd_opt(2018, 8, 3)
        .unwrap()
        .and_hms_opt(23, 0, 0)
        .unwrap();
    assert_eq!(parse_timestamp(raw).unwrap(), expected);
}

#[test]
fn test_parse_timestamp_rejects_garbage() {
    assert!(matches!(
        parse_timestamp("03/08/2018 11pm"),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_series_accessors() {
    let timestamps = hours_from("2018-01-01 00:00:00", &[0, 1, 2, 3]);
    let series = TimeSeries::new(timestamps.clone(), vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    assert_eq!(series.len(), 4);
    assert!(!series.is_empty());
    assert_eq!(series.first_timestamp(), Some(timestamps[0]));
    assert_eq!(series.last_timestamp(), Some(timestamps[3]));
    assert_eq!(
        series.iter().collect::<Vec<_>>(),
        vec![
            (timestamps[0], 1.0),
            (timestamps[1], 2.0),
            (timestamps[2], 3.0),
            (timestamps[3], 4.0),
        ]
    );

    let tail = series.tail(2);
    assert_eq!(tail.timestamps(), &timestamps[2..]);
    assert_eq!(tail.values(), &[3.0, 4.0]);
    assert_eq!(series.tail(10), series);
}

#[test]
fn test_from_pairs_matches_new() {
    let timestamps = hours_from("2018-01-01 00:00:00", &[0, 1]);
    let pairs = vec![(timestamps[0], 5.0), (timestamps[1], 6.0)];

    assert_eq!(
        TimeSeries::from_pairs(pairs).unwrap(),
        TimeSeries::new(timestamps, vec![5.0, 6.0]).unwrap()
    );
}

#[test]
fn test_duplicate_timestamps_are_rejected() {
    let timestamps = hours_from("2018-01-01 00:00:00", &[0, 1, 1, 2]);
    let result = TimeSeries::new(timestamps, vec![1.0; 4]);
    assert!(matches!(result, Err(ForecastError::DataQuality(_))));
}

#[test]
fn test_unordered_timestamps_are_rejected() {
    let timestamps = hours_from("2018-01-01 00:00:00", &[0, 2, 1]);
    let result = TimeSeries::new(timestamps, vec![1.0; 3]);
    assert!(matches!(result, Err(ForecastError::DataQuality(_))));
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
fn test_non_finite_values_are_rejected(#[case] bad: f64) {
    let timestamps = hours_from("2018-01-01 00:00:00", &[0, 1, 2]);
    let result = TimeSeries::new(timestamps, vec![1.0, bad, 3.0]);
    assert!(matches!(result, Err(ForecastError::DataQuality(_))));
}

#[test]
fn test_length_mismatch_is_rejected() {
    let timestamps = hours_from("2018-01-01 00:00:00", &[0, 1, 2]);
    let result = TimeSeries::new(timestamps, vec![1.0, 2.0]);
    assert!(matches!(result, Err(ForecastError::DataQuality(_))));
}

#[test]
fn test_gaps_report_missing_hours() {
    let timestamps = hours_from("2018-01-01 00:00:00", &[0, 1, 4, 5, 7]);
    let series = TimeSeries::new(timestamps.clone(), vec![1.0; 5]).unwrap();

    let gaps = series.gaps(Duration::hours(1));

    assert_eq!(
        gaps,
        vec![
            Gap {
                after: timestamps[1],
                before: timestamps[2],
                missing_steps: 2,
            },
            Gap {
                after: timestamps[3],
                before: timestamps[4],
                missing_steps: 1,
            },
        ]
    );
}

#[test]
fn test_check_cadence() {
    let timestamps = hours_from("2018-01-01 00:00:00", &[0, 1, 4, 5]);
    let series = TimeSeries::new(timestamps, vec![1.0; 4]).unwrap();

    assert!(series.check_cadence(Duration::hours(3)).is_ok());
    assert!(matches!(
        series.check_cadence(Duration::hours(2)),
        Err(ForecastError::DataQuality(_))
    ));
}

#[test]
fn test_load_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("load.csv");
    fs::write(
        &path,
        "Datetime,PJME_MW\n\
         2018-08-03 21:00:00,40112.0\n\
         2018-08-03 22:00:00,39352.5\n\
         2018-08-03 23:00:00,35486.0\n",
    )
    .unwrap();

    let series = DataLoader::from_csv(&path, "Datetime", "PJME_MW").unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.first_timestamp(), Some(ts("2018-08-03 21:00:00")));
    assert_eq!(series.last_timestamp(), Some(ts("2018-08-03 23:00:00")));
    assert_eq!(series.values(), &[40112.0, 39352.5, 35486.0]);
}

#[test]
fn test_load_csv_rejects_unordered_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("load.csv");
    fs::write(
        &path,
        "Datetime,PJME_MW\n\
         2018-08-03 23:00:00,35486.0\n\
         2018-08-03 22:00:00,39352.5\n",
    )
    .unwrap();

    let result = DataLoader::from_csv(&path, "Datetime", "PJME_MW");
    assert!(matches!(result, Err(ForecastError::DataQuality(_))));
}

#[test]
fn test_load_csv_missing_column() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("load.csv");
    fs::write(&path, "Datetime,AEP_MW\n2018-08-03 23:00:00,15000.0\n").unwrap();

    let result = DataLoader::from_csv(&path, "Datetime", "PJME_MW");
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_load_csv_missing_file() {
    let dir = tempdir().unwrap();
    let result = DataLoader::from_csv(dir.path().join("absent.csv"), "Datetime", "PJME_MW");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}
