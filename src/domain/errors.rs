use thiserror::Error;

/// Errors raised while loading and validating OHLCV input.
///
/// The structural pipeline itself never errors: insufficient data degrades to
/// empty stage outputs. These variants cover the input contract the loader
/// enforces before candles reach the pipeline.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Empty candle series: {path}")]
    EmptySeries { path: String },

    #[error("Non-monotonic timestamps at row {row}: {previous} >= {current}")]
    NonMonotonicTimestamps {
        row: usize,
        previous: i64,
        current: i64,
    },

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_monotonic_formatting() {
        let error = DataError::NonMonotonicTimestamps {
            row: 12,
            previous: 2000,
            current: 1000,
        };

        let msg = error.to_string();
        assert!(msg.contains("row 12"));
        assert!(msg.contains("2000"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn test_malformed_row_formatting() {
        let error = DataError::MalformedRow {
            row: 3,
            reason: "high 90 below low 100".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("high 90 below low 100"));
    }
}
