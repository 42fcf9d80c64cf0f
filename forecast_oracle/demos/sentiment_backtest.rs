use chrono::{Days, NaiveDate};
use forecast_oracle::news::{SentimentLabel, SentimentSample, StaticNewsSource};
use forecast_oracle::{check_confidence, SentimentPredictor, SeriesStore, TimeSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let today = NaiveDate::from_ymd_opt(2024, 3, 31).ok_or("bad date")?;
    let start = today - Days::new(29);

    // Persist a month of prices where the sentiment predictor can find its base prices
    let series = TimeSeries::from_pairs(
        (0..30u64).map(|i| (start + Days::new(i), 180.0 + (i % 5) as f64)),
    )?;
    let store = SeriesStore::new(std::env::temp_dir().join("oracle_sentiment_demo.csv"));
    store.save(&series)?;

    // One headline per day, alternating in tone
    let articles = (0..30u64)
        .map(|i| {
            let label = if i % 3 == 0 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Positive
            };
            SentimentSample::new(&format!("Headline {}", i), "https://example.com", label)
                .with_date(start + Days::new(i))
        })
        .collect();
    let news = StaticNewsSource::new().with_articles("AAPL", articles);

    let predictor = SentimentPredictor::new("AAPL", news, store.clone()).with_reference_date(today);
    let result = check_confidence(&series, 7, 5, &predictor)?;

    for point in result.rollout.tail(7) {
        println!("{}  {:>8.2}", point.date, point.value);
    }
    println!("Confidence: {:.4}", result.confidence);

    store.clear()?;
    Ok(())
}
