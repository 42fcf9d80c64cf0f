//! News collaborator contract and in-process implementations
//!
//! Fetching headlines from the network is out of scope; a [`NewsSource`] hands the
//! predictor already-labelled articles. Sources never fail: a fetch problem is reported
//! as an empty list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Maximum number of articles returned when no date filter is given
pub const LIVE_NEWS_LIMIT: usize = 5;

/// Sentiment assigned to a headline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

impl SentimentLabel {
    /// Numeric polarity: `+1`, `0` or `-1`
    pub fn polarity(self) -> f64 {
        match self {
            SentimentLabel::Positive => 1.0,
            SentimentLabel::Neutral => 0.0,
            SentimentLabel::Negative => -1.0,
        }
    }
}

/// A labelled news article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSample {
    pub title: String,
    #[serde(alias = "link")]
    pub url: String,
    #[serde(default)]
    pub sentiment: SentimentLabel,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl SentimentSample {
    /// Create an undated sample
    pub fn new(title: &str, url: &str, sentiment: SentimentLabel) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            sentiment,
            date: None,
        }
    }

    /// Attach a publish date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Anything that can supply labelled headlines for a ticker
pub trait NewsSource {
    /// Articles for `ticker`.
    ///
    /// Without a `date`, at most [`LIVE_NEWS_LIMIT`] of the latest articles. With a
    /// `date`, every article published on that day.
    fn get_news(&self, ticker: &str, date: Option<NaiveDate>) -> Vec<SentimentSample>;
}

impl<T: NewsSource + ?Sized> NewsSource for &T {
    fn get_news(&self, ticker: &str, date: Option<NaiveDate>) -> Vec<SentimentSample> {
        (**self).get_news(ticker, date)
    }
}

/// Mean polarity of `samples`, in `[-1, 1]`; `None` when there are none
pub fn average_polarity(samples: &[SentimentSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().map(|s| s.sentiment.polarity()).sum();
    Some(total / samples.len() as f64)
}

fn select(articles: &[SentimentSample], date: Option<NaiveDate>) -> Vec<SentimentSample> {
    match date {
        Some(day) => articles
            .iter()
            .filter(|a| a.date == Some(day))
            .cloned()
            .collect(),
        None => articles.iter().take(LIVE_NEWS_LIMIT).cloned().collect(),
    }
}

/// In-memory news keyed by ticker (case-insensitive), latest article first
#[derive(Debug, Clone, Default)]
pub struct StaticNewsSource {
    articles: HashMap<String, Vec<SentimentSample>>,
}

impl StaticNewsSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add articles for a ticker
    pub fn with_articles(mut self, ticker: &str, articles: Vec<SentimentSample>) -> Self {
        self.articles
            .entry(ticker.to_uppercase())
            .or_default()
            .extend(articles);
        self
    }
}

impl NewsSource for StaticNewsSource {
    fn get_news(&self, ticker: &str, date: Option<NaiveDate>) -> Vec<SentimentSample> {
        self.articles
            .get(&ticker.to_uppercase())
            .map(|articles| select(articles, date))
            .unwrap_or_default()
    }
}

/// News read from a JSON snapshot of the form `{ "TICKER": [article, ...] }`.
///
/// The file is re-read on every call, so predictions follow the snapshot as it changes.
#[derive(Debug, Clone)]
pub struct JsonNewsSource {
    path: PathBuf,
}

impl JsonNewsSource {
    /// Create a source backed by the snapshot at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_snapshot(&self) -> Option<HashMap<String, Vec<SentimentSample>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "news snapshot unreadable");
                return None;
            }
        };
        match serde_json::from_str::<HashMap<String, Vec<SentimentSample>>>(&text) {
            Ok(snapshot) => {
                let mut merged: HashMap<String, Vec<SentimentSample>> = HashMap::new();
                for (ticker, articles) in snapshot {
                    merged
                        .entry(ticker.to_uppercase())
                        .or_default()
                        .extend(articles);
                }
                Some(merged)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "news snapshot malformed");
                None
            }
        }
    }
}

impl NewsSource for JsonNewsSource {
    fn get_news(&self, ticker: &str, date: Option<NaiveDate>) -> Vec<SentimentSample> {
        self.read_snapshot()
            .and_then(|snapshot| {
                snapshot
                    .get(&ticker.to_uppercase())
                    .map(|articles| select(articles, date))
            })
            .unwrap_or_default()
    }
}
