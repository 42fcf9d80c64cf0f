use forecast_oracle::config::{OracleConfig, PredictorKind};
use forecast_oracle::news::{JsonNewsSource, StaticNewsSource};
use forecast_oracle::{
    check_confidence, AutoregressivePredictor, ConfidenceResult, NextValuePredictor,
    SentimentPredictor, SeriesStore,
};
use std::error::Error;

fn init_logging() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn print_report(config: &OracleConfig, result: &ConfidenceResult) {
    println!(
        "{} | lag {} days | horizon {} days",
        config.ticker, config.lag_days, config.horizon_days
    );
    println!("{:<12} {:>12}", "Date", "Value");
    for point in result.rollout.points() {
        let marker = if point.date > result.divergence_date {
            "*"
        } else {
            ""
        };
        println!("{:<12} {:>12.2}{}", point.date.to_string(), point.value, marker);
    }
    println!("(* generated after {})", result.divergence_date);
    println!();
    if let Some(accuracy) = &result.accuracy {
        print!("{}", accuracy);
    }
    println!("Confidence: {:.4}", result.confidence);
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let json_output = std::env::args().skip(1).any(|arg| arg == "--json");

    let config = OracleConfig::from_env()?;
    tracing::info!(
        data_path = %config.data_path.display(),
        ticker = %config.ticker,
        predictor = ?config.predictor,
        "configuration loaded"
    );

    let store = SeriesStore::new(&config.data_path);
    let series = store.load()?;

    let result = match config.predictor {
        PredictorKind::Autoregressive => {
            let predictor = AutoregressivePredictor::new();
            run(&series, &config, &predictor)?
        }
        PredictorKind::Sentiment => match &config.news_path {
            Some(path) => {
                let predictor =
                    SentimentPredictor::new(&config.ticker, JsonNewsSource::new(path), store);
                run(&series, &config, &predictor)?
            }
            None => {
                tracing::warn!("ORACLE_NEWS_PATH not set, sentiment predictor has no news");
                let predictor =
                    SentimentPredictor::new(&config.ticker, StaticNewsSource::new(), store);
                run(&series, &config, &predictor)?
            }
        },
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&config, &result);
    }

    Ok(())
}

fn run(
    series: &forecast_oracle::TimeSeries,
    config: &OracleConfig,
    predictor: &dyn NextValuePredictor,
) -> forecast_oracle::Result<ConfidenceResult> {
    check_confidence(series, config.horizon_days, config.lag_days, predictor)
}
