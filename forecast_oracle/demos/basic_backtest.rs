use chrono::{Days, NaiveDate};
use forecast_oracle::{check_confidence, AutoregressivePredictor, TimeSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A gently trending series with a weekly wobble
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad start date")?;
    let series = TimeSeries::from_pairs((0..90u64).map(|i| {
        let trend = 150.0 + 0.4 * i as f64;
        let wobble = 3.0 * (i as f64 * std::f64::consts::TAU / 7.0).sin();
        (start + Days::new(i), trend + wobble)
    }))?;
    println!("Loaded {} data points", series.len());

    let predictor = AutoregressivePredictor::new();
    for lag_days in [1, 7, 14] {
        let result = check_confidence(&series, 14, lag_days, &predictor)?;
        println!(
            "lag {:>2} days: confidence {:.4} (diverged after {})",
            lag_days, result.confidence, result.divergence_date
        );
        if let Some(accuracy) = result.accuracy {
            print!("{}", accuracy);
        }
    }

    Ok(())
}
