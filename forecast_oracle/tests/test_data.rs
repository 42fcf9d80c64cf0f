use chrono::NaiveDate;
use forecast_oracle::data::{DataPoint, TimeSeries};
use forecast_oracle::ForecastError;
use polars::prelude::*;
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_test_series() -> TimeSeries {
    TimeSeries::from_pairs(vec![
        (date(2024, 1, 1), 100.0),
        (date(2024, 1, 2), 101.0),
        (date(2024, 1, 3), 102.5),
        (date(2024, 1, 4), 103.0),
    ])
    .unwrap()
}

#[test]
fn test_load_with_header() {
    let text = "Date,Value\n2024-01-01,100\n2024-01-02,101.5\n";
    let series = TimeSeries::load(text.as_bytes()).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(
        series.points(),
        &[
            DataPoint::new(date(2024, 1, 1), 100.0),
            DataPoint::new(date(2024, 1, 2), 101.5),
        ]
    );
}

#[test]
fn test_load_without_header() {
    let text = "2024-01-01,100\n2024-01-02, 101\n";
    let series = TimeSeries::load(text.as_bytes()).unwrap();

    assert_eq!(series.values(), vec![100.0, 101.0]);
}

#[test]
fn test_load_header_only_is_empty() {
    let series = TimeSeries::load("Date,Value\n".as_bytes()).unwrap();
    assert!(series.is_empty());
}

#[test]
fn test_load_rejects_unreadable_first_row() {
    let text = "n/a,n/a\n2024-01-01,100\n";
    match TimeSeries::load(text.as_bytes()) {
        Err(ForecastError::FormatError(msg)) => assert!(msg.contains("line 1"), "{}", msg),
        other => panic!("Expected FormatError, got {:?}", other),
    }

    let lowercase_header = "date,close\n2024-01-01,100\n";
    assert_eq!(TimeSeries::load(lowercase_header.as_bytes()).unwrap().len(), 1);
}

#[test]
fn test_load_format_errors() {
    let too_many = "Date,Value\n2024-01-01,100,7\n";
    assert!(matches!(
        TimeSeries::load(too_many.as_bytes()),
        Err(ForecastError::FormatError(_))
    ));

    let too_few = "Date,Value\n2024-01-01\n";
    assert!(matches!(
        TimeSeries::load(too_few.as_bytes()),
        Err(ForecastError::FormatError(_))
    ));

    let not_numeric = "Date,Value\n2024-01-01,abc\n";
    assert!(matches!(
        TimeSeries::load(not_numeric.as_bytes()),
        Err(ForecastError::FormatError(_))
    ));

    let bad_date = "2024-13-01,100\n";
    assert!(matches!(
        TimeSeries::load(bad_date.as_bytes()),
        Err(ForecastError::FormatError(_))
    ));
}

#[test]
fn test_format_error_names_the_line() {
    let text = "Date,Value\n2024-01-01,100\n2024-01-02,oops\n";
    let err = TimeSeries::load(text.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("line 3"), "{}", err);
}

#[test]
fn test_load_rejects_unordered_dates() {
    let text = "Date,Value\n2024-01-02,100\n2024-01-01,101\n";
    assert!(matches!(
        TimeSeries::load(text.as_bytes()),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_tail() {
    let series = create_test_series();

    assert_eq!(series.tail(2).len(), 2);
    assert_eq!(series.tail(2)[0].date, date(2024, 1, 3));
    assert_eq!(series.tail(10).len(), 4);
    assert!(series.tail(0).is_empty());
    assert_eq!(series.tail_values(2), vec![102.5, 103.0]);
    assert!(TimeSeries::default().tail(3).is_empty());
}

#[test]
fn test_replace_is_all_or_nothing() {
    let mut series = create_test_series();
    let before = series.clone();

    let bad = vec![
        DataPoint::new(date(2024, 2, 2), 1.0),
        DataPoint::new(date(2024, 2, 1), 2.0),
    ];
    assert!(series.replace(bad).is_err());
    assert_eq!(series, before);

    let good = vec![DataPoint::new(date(2024, 2, 1), 5.0)];
    series.replace(good).unwrap();
    assert_eq!(series.values(), vec![5.0]);
}

#[test]
fn test_clear_and_push() {
    let mut series = create_test_series();
    series.clear();
    assert!(series.is_empty());

    series.push(date(2024, 3, 1), 10.0).unwrap();
    series.push(date(2024, 3, 2), 11.0).unwrap();
    assert!(matches!(
        series.push(date(2024, 3, 2), 12.0),
        Err(ForecastError::DataError(_))
    ));
    assert_eq!(series.len(), 2);
}

#[test]
fn test_up_to_and_lookup() {
    let series = TimeSeries::from_pairs(vec![
        (date(2024, 1, 1), 100.0),
        (date(2024, 1, 5), 105.0),
        (date(2024, 1, 9), 109.0),
    ])
    .unwrap();

    assert_eq!(series.up_to(date(2024, 1, 5)).len(), 2);
    assert_eq!(series.up_to(date(2023, 12, 31)).len(), 0);
    assert_eq!(series.value_at_or_before(date(2024, 1, 5)), Some(105.0));
    assert_eq!(series.value_at_or_before(date(2024, 1, 7)), Some(105.0));
    assert_eq!(series.value_at_or_before(date(2023, 6, 1)), None);
}

#[test]
fn test_head() {
    let series = create_test_series();
    assert_eq!(series.head(2).values(), vec![100.0, 101.0]);
    assert_eq!(series.head(99).len(), 4);
}

#[test]
fn test_dataframe_round_trip() {
    let series = create_test_series();

    let df = series.to_dataframe().unwrap();
    assert_eq!(df.height(), 4);
    assert_eq!(df.get_column_names(), vec!["Date", "Value"]);

    let back = TimeSeries::from_dataframe(&df).unwrap();
    assert_eq!(back, series);
}

#[test]
fn test_from_dataframe_with_integer_values() {
    let df = DataFrame::new(vec![
        Series::new("Date", vec!["2024-01-01", "2024-01-02"]),
        Series::new("Value", vec![100i64, 101]),
    ])
    .unwrap();

    let series = TimeSeries::from_dataframe(&df).unwrap();
    assert_eq!(series.values(), vec![100.0, 101.0]);
}

#[test]
fn test_from_dataframe_missing_column() {
    let df = DataFrame::new(vec![Series::new("Close", vec![1.0, 2.0])]).unwrap();
    assert!(TimeSeries::from_dataframe(&df).is_err());
}
