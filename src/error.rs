//! Error types for the benchmark harness.
//!
//! Book operations themselves never fail; only configuration and
//! reporting can.

use thiserror::Error;

/// Errors raised while configuring or reporting a benchmark run
#[derive(Debug, Error)]
pub enum BenchError {
    /// Variant selector is not one of `map`, `vector`, `hash`
    #[error("unknown variant `{0}` (expected one of: map, vector, hash)")]
    UnknownVariant(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// hdrhistogram creation or record failure
    #[error("latency histogram: {0}")]
    Histogram(String),

    #[error("csv report: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_message() {
        let err = BenchError::UnknownVariant("deque".to_string());
        assert_eq!(
            err.to_string(),
            "unknown variant `deque` (expected one of: map, vector, hash)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BenchError = io.into();
        assert!(matches!(err, BenchError::Io(_)));
    }
}
