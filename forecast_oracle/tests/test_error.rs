use forecast_oracle::ForecastError;
use oracle_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    // IO errors keep their source
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    // Math errors from the least squares layer
    let math_error = MathError::InsufficientData("no samples".to_string());
    let forecast_error = ForecastError::from(math_error.clone());
    match forecast_error {
        ForecastError::MathError(inner) => assert_eq!(inner, math_error),
        other => panic!("Expected MathError variant, got {:?}", other),
    }
}

#[test]
fn test_csv_error_conversion() {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader("a,b\nc\n".as_bytes());
    let csv_error = reader
        .records()
        .find_map(|r| r.err())
        .expect("ragged rows should fail without flexible mode");

    let forecast_error = ForecastError::from(csv_error);
    assert!(matches!(forecast_error, ForecastError::CsvError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("lag_days must be at least 1".to_string());
    assert_eq!(error.to_string(), "Invalid parameter: lag_days must be at least 1");

    let error = ForecastError::FormatError("line 3: invalid value 'abc'".to_string());
    assert!(error.to_string().contains("line 3"));

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));

    let error = ForecastError::from(MathError::CalculationError("singular".to_string()));
    assert!(error.to_string().starts_with("Math error"));
}

#[test]
fn test_error_variants_are_distinct() {
    let errors = [
        ForecastError::FormatError("x".to_string()),
        ForecastError::InsufficientData("x".to_string()),
        ForecastError::DataError("x".to_string()),
        ForecastError::InvalidParameter("x".to_string()),
        ForecastError::ConfigError("x".to_string()),
    ];

    let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    for (i, a) in rendered.iter().enumerate() {
        for b in rendered.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_error_is_std_error() {
    fn boxed(err: ForecastError) -> Box<dyn std::error::Error> {
        Box::new(err)
    }

    let err = boxed(ForecastError::from(io::Error::new(io::ErrorKind::Other, "disk")));
    assert!(err.source().is_some());
}
