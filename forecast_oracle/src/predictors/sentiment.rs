//! Sentiment-driven predictor
//!
//! Instead of price lags, the next value is a base price nudged by the average polarity
//! of the ticker's headlines: `base * (1 + adjustment * polarity)`.
//!
//! Two modes:
//! - live (no day offset): latest headlines, base is the last persisted price
//! - backtest (day offset present): headlines published on
//!   `today - (lag_days + day_offset)`, base is the persisted price on or before that day
//!
//! Output depends on whatever the news source returns at call time, so two identical
//! rollouts can produce different values if the news snapshot changed in between.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::news::{average_polarity, NewsSource};
use crate::predictors::{NextValuePredictor, PredictionContext};
use crate::store::SeriesStore;
use chrono::{Days, Local, NaiveDate};
use tracing::{debug, warn};

/// Fractional price move per unit of polarity
pub const SENTIMENT_ADJUSTMENT: f64 = 0.25;
/// Base price used when no persisted price is available
pub const FALLBACK_PRICE: f64 = 100.0;

/// Predictor driven by aggregated headline sentiment
#[derive(Debug, Clone)]
pub struct SentimentPredictor<N> {
    name: String,
    ticker: String,
    news: N,
    store: SeriesStore,
    reference_date: Option<NaiveDate>,
    adjustment: f64,
}

impl<N: NewsSource> SentimentPredictor<N> {
    /// Create a predictor for `ticker`, reading base prices from `store`
    pub fn new(ticker: &str, news: N, store: SeriesStore) -> Self {
        Self {
            name: format!("Sentiment ({})", ticker),
            ticker: ticker.to_string(),
            news,
            store,
            reference_date: None,
            adjustment: SENTIMENT_ADJUSTMENT,
        }
    }

    /// Pin "today" to a fixed date instead of the local calendar date
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Override the fractional move per unit of polarity
    pub fn with_adjustment(mut self, adjustment: f64) -> Result<Self> {
        if !adjustment.is_finite() || adjustment <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Sentiment adjustment must be a positive finite number".to_string(),
            ));
        }
        self.adjustment = adjustment;
        Ok(self)
    }

    /// Ticker whose news drives the prediction
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Day whose headlines and price are used for backtest step `day_offset`
    pub fn target_date(&self, lag_days: usize, day_offset: usize) -> NaiveDate {
        let today = self.today();
        today
            .checked_sub_days(Days::new(lag_days.saturating_add(day_offset) as u64))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Live prediction, or `None` when there is no news to base it on
    pub fn live_signal(&self) -> Option<f64> {
        let articles = self.news.get_news(&self.ticker, None);
        let polarity = average_polarity(&articles)?;
        let base = self.latest_price();
        debug!(ticker = %self.ticker, articles = articles.len(), polarity, base, "live sentiment");
        Some(self.adjust(base, polarity))
    }

    /// Predict the next value.
    ///
    /// In live mode an empty news feed yields `0.0`; callers that need to tell "no
    /// signal" apart from a genuine value should use [`live_signal`](Self::live_signal).
    pub fn fit_and_predict_next(&self, lag_days: usize, day_offset: Option<usize>) -> f64 {
        match day_offset {
            None => self.live_signal().unwrap_or_else(|| {
                warn!(ticker = %self.ticker, "no news available, predicting 0.0");
                0.0
            }),
            Some(offset) => {
                let target = self.target_date(lag_days, offset);
                let articles = self.news.get_news(&self.ticker, Some(target));
                let polarity = average_polarity(&articles).unwrap_or(0.0);
                let base = self.historical_price(target);
                debug!(
                    ticker = %self.ticker,
                    %target,
                    articles = articles.len(),
                    polarity,
                    base,
                    "backtest sentiment"
                );
                self.adjust(base, polarity)
            }
        }
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn adjust(&self, base: f64, polarity: f64) -> f64 {
        base * (1.0 + self.adjustment * polarity)
    }

    fn persisted_series(&self) -> Option<TimeSeries> {
        match self.store.load() {
            Ok(series) if !series.is_empty() => Some(series),
            Ok(_) => {
                warn!(path = %self.store.path().display(), "persisted series is empty");
                None
            }
            Err(e) => {
                warn!(path = %self.store.path().display(), error = %e, "persisted series unavailable");
                None
            }
        }
    }

    fn latest_price(&self) -> f64 {
        self.persisted_series()
            .and_then(|series| series.last().map(|p| p.value))
            .unwrap_or(FALLBACK_PRICE)
    }

    fn historical_price(&self, date: NaiveDate) -> f64 {
        self.persisted_series()
            .and_then(|series| {
                series
                    .value_at_or_before(date)
                    .or_else(|| series.first().map(|p| p.value))
            })
            .unwrap_or(FALLBACK_PRICE)
    }
}

impl<N: NewsSource> NextValuePredictor for SentimentPredictor<N> {
    fn predict_next(&self, context: &PredictionContext<'_>) -> Result<f64> {
        Ok(self.fit_and_predict_next(context.lag_days, context.day_offset))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
