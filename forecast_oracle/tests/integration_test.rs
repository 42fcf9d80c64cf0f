use chrono::{Days, NaiveDate};
use forecast_oracle::config::{OracleConfig, PredictorKind};
use forecast_oracle::news::{SentimentLabel, SentimentSample, StaticNewsSource};
use forecast_oracle::{
    check_confidence, AutoregressivePredictor, NextValuePredictor, SentimentPredictor,
    SeriesStore, TimeSeries,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn write_prices(dir: &TempDir, days: u64) -> std::path::PathBuf {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut text = String::from("Date,Value\n");
    for i in 0..days {
        let value = 150.0 + i as f64 * 0.5 + if i % 2 == 0 { 1.0 } else { -1.0 };
        text.push_str(&format!("{},{}\n", start + Days::new(i), value));
    }
    let path = dir.path().join("prices.csv");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_full_backtest_workflow() {
    let dir = TempDir::new().unwrap();
    let path = write_prices(&dir, 60);
    let config = OracleConfig::from_lookup(|key| {
        let vars: HashMap<&str, String> = [
            ("ORACLE_DATA_PATH", path.display().to_string()),
            ("ORACLE_LAG_DAYS", "5".to_string()),
            ("ORACLE_HORIZON_DAYS", "7".to_string()),
        ]
        .into_iter()
        .collect();
        vars.get(key).cloned()
    })
    .unwrap();

    assert_eq!(config.predictor, PredictorKind::Autoregressive);

    let store = SeriesStore::new(&config.data_path);
    let series = store.load().unwrap();
    assert_eq!(series.len(), 60);

    let predictor = AutoregressivePredictor::new();
    let result =
        check_confidence(&series, config.horizon_days, config.lag_days, &predictor).unwrap();

    assert!((0.0..=1.0).contains(&result.confidence));
    assert_eq!(result.rollout.dates(), series.dates());
    assert_eq!(result.divergence_date, series.points()[52].date);
    assert_eq!(&result.rollout.points()[..53], &series.points()[..53]);

    let accuracy = result.accuracy.as_ref().unwrap();
    assert_eq!(accuracy.points, 7);

    // The alternating pattern is easy for a 5-day lag; the areas should be close
    assert!(result.confidence > 0.9, "confidence {}", result.confidence);

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"confidence\""));
    assert!(json.contains("\"divergence_date\""));

    // Input file is untouched by a backtest
    assert_eq!(store.load().unwrap(), series);
}

#[test]
fn test_predictors_are_interchangeable() {
    let dir = TempDir::new().unwrap();
    let path = write_prices(&dir, 40);
    let store = SeriesStore::new(&path);
    let series = store.load().unwrap();
    let last = series.last().unwrap().date;

    let news = StaticNewsSource::new().with_articles(
        "AAPL",
        vec![SentimentSample::new("Upgrade", "https://news.example/u", SentimentLabel::Positive)
            .with_date(last)],
    );
    let sentiment = SentimentPredictor::new("AAPL", news, store.clone())
        .with_reference_date(last + Days::new(3));
    let autoregressive = AutoregressivePredictor::new();

    let predictors: Vec<&dyn NextValuePredictor> = vec![&autoregressive, &sentiment];
    for predictor in predictors {
        let result = check_confidence(&series, 5, 3, predictor).unwrap();
        assert_eq!(result.rollout.len(), series.len());
        assert!((0.0..=1.0).contains(&result.confidence));
    }
}

#[test]
fn test_store_round_trip_and_clear() {
    let dir = TempDir::new().unwrap();
    let path = write_prices(&dir, 10);
    let store = SeriesStore::new(&path);

    let mut series = store.load().unwrap();
    let next = series.last().unwrap().date + Days::new(1);
    series.push(next, 200.0).unwrap();
    store.save(&series).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.len(), 11);
    assert_eq!(reloaded.last().unwrap().value, 200.0);

    store.clear().unwrap();
    assert!(store.load().unwrap().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "Date,Value\n");

    let empty = TimeSeries::default();
    assert!(check_confidence(&empty, 1, 1, &AutoregressivePredictor::new()).is_err());
}

#[test]
fn test_dataframe_interop() {
    let dir = TempDir::new().unwrap();
    let path = write_prices(&dir, 15);
    let series = SeriesStore::new(&path).load().unwrap();

    let df = series.to_dataframe().unwrap();
    assert_eq!(df.height(), 15);

    let back = TimeSeries::from_dataframe(&df).unwrap();
    assert_eq!(back, series);
}
