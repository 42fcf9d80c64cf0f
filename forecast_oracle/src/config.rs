//! Runtime configuration read from the environment

use crate::error::{ForecastError, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Lag window used when none is configured
pub const DEFAULT_LAG_DAYS: usize = 30;
/// Backtest horizon used when none is configured
pub const DEFAULT_HORIZON_DAYS: usize = 10;

/// Which one-step predictor drives the rollout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictorKind {
    #[default]
    Autoregressive,
    Sentiment,
}

impl FromStr for PredictorKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "autoregressive" | "ar" => Ok(PredictorKind::Autoregressive),
            "sentiment" => Ok(PredictorKind::Sentiment),
            other => Err(ForecastError::ConfigError(format!(
                "unknown predictor '{}' (expected 'autoregressive' or 'sentiment')",
                other
            ))),
        }
    }
}

/// Settings for a backtest run
#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    /// Persisted series location
    pub data_path: PathBuf,
    pub ticker: String,
    pub lag_days: usize,
    pub horizon_days: usize,
    pub predictor: PredictorKind,
    /// JSON news snapshot for the sentiment predictor
    pub news_path: Option<PathBuf>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            ticker: "AAPL".to_string(),
            lag_days: DEFAULT_LAG_DAYS,
            horizon_days: DEFAULT_HORIZON_DAYS,
            predictor: PredictorKind::default(),
            news_path: None,
        }
    }
}

impl OracleConfig {
    /// Read `ORACLE_*` variables, falling back to defaults for unset ones
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            data_path: lookup("ORACLE_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            ticker: lookup("ORACLE_TICKER").unwrap_or(defaults.ticker),
            lag_days: parse_var(&lookup, "ORACLE_LAG_DAYS")?.unwrap_or(defaults.lag_days),
            horizon_days: parse_var(&lookup, "ORACLE_HORIZON_DAYS")?
                .unwrap_or(defaults.horizon_days),
            predictor: parse_var(&lookup, "ORACLE_PREDICTOR")?.unwrap_or(defaults.predictor),
            news_path: lookup("ORACLE_NEWS_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no run can use
    pub fn validate(&self) -> Result<()> {
        if self.lag_days == 0 {
            return Err(ForecastError::ConfigError(
                "ORACLE_LAG_DAYS must be at least 1".to_string(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(ForecastError::ConfigError(
                "ORACLE_HORIZON_DAYS must be at least 1".to_string(),
            ));
        }
        if self.ticker.trim().is_empty() {
            return Err(ForecastError::ConfigError(
                "ORACLE_TICKER must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                ForecastError::ConfigError(format!("{} has invalid value '{}': {}", key, raw, e))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = OracleConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, OracleConfig::default());
        assert_eq!(config.lag_days, 30);
    }

    #[test]
    fn test_overrides() {
        let config = OracleConfig::from_lookup(lookup_from(&[
            ("ORACLE_DATA_PATH", "/tmp/prices.csv"),
            ("ORACLE_TICKER", "MSFT"),
            ("ORACLE_LAG_DAYS", "5"),
            ("ORACLE_HORIZON_DAYS", " 7 "),
            ("ORACLE_PREDICTOR", "Sentiment"),
            ("ORACLE_NEWS_PATH", "news.json"),
        ]))
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/tmp/prices.csv"));
        assert_eq!(config.ticker, "MSFT");
        assert_eq!(config.lag_days, 5);
        assert_eq!(config.horizon_days, 7);
        assert_eq!(config.predictor, PredictorKind::Sentiment);
        assert_eq!(config.news_path, Some(PathBuf::from("news.json")));
    }

    #[test]
    fn test_invalid_values() {
        let bad_lag = OracleConfig::from_lookup(lookup_from(&[("ORACLE_LAG_DAYS", "0")]));
        assert!(matches!(bad_lag, Err(ForecastError::ConfigError(_))));

        let not_a_number = OracleConfig::from_lookup(lookup_from(&[("ORACLE_HORIZON_DAYS", "ten")]));
        assert!(matches!(not_a_number, Err(ForecastError::ConfigError(_))));

        let bad_predictor = OracleConfig::from_lookup(lookup_from(&[("ORACLE_PREDICTOR", "arima")]));
        assert!(matches!(bad_predictor, Err(ForecastError::ConfigError(_))));
    }
}
