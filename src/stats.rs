//! Latency sample storage and percentile extraction.
//!
//! Samples are stored raw in a pre-sized buffer so that recording never
//! allocates inside the timed loop. Percentiles come from sorting the
//! buffer and indexing at `floor(q * len)`.

use hdrhistogram::Histogram;

use crate::error::{BenchError, Result};

/// Raw per-operation latencies in nanoseconds
#[derive(Clone, Debug, Default)]
pub struct LatencySamples {
    samples: Vec<u64>,
}

impl LatencySamples {
    /// Pre-size for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn record(&mut self, nanos: u64) {
        self.samples.push(nanos);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.samples
    }

    /// Sort the samples in place and extract the summary.
    pub fn summarize(&mut self) -> LatencySummary {
        self.samples.sort_unstable();
        let sorted = &self.samples;
        LatencySummary {
            count: sorted.len(),
            min: sorted.first().copied().unwrap_or(0),
            median: percentile(sorted, 0.50),
            p95: percentile(sorted, 0.95),
            p99: percentile(sorted, 0.99),
            p999: percentile(sorted, 0.999),
            max: sorted.last().copied().unwrap_or(0),
        }
    }

    /// Copy the samples into an auto-resizing HDR histogram (3 significant figures).
    pub fn histogram(&self) -> Result<Histogram<u64>> {
        let mut histogram =
            Histogram::<u64>::new(3).map_err(|e| BenchError::Histogram(format!("{e:?}")))?;
        for &nanos in &self.samples {
            histogram
                .record(nanos)
                .map_err(|e| BenchError::Histogram(format!("{e:?}")))?;
        }
        Ok(histogram)
    }
}

/// Value at quantile `q` of an ascending slice.
///
/// Index is `floor(q * len)` clamped to the last element; 0 when empty.
pub fn percentile(sorted: &[u64], q: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((q * sorted.len() as f64) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Latency percentiles of one run, in nanoseconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatencySummary {
    pub count: usize,
    pub min: u64,
    pub median: u64,
    pub p95: u64,
    pub p99: u64,
    pub p999: u64,
    pub max: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_indexing() {
        let sorted: Vec<u64> = (1..=100).collect();
        // floor(0.5 * 100) = 50 -> value 51
        assert_eq!(percentile(&sorted, 0.50), 51);
        assert_eq!(percentile(&sorted, 0.95), 96);
        assert_eq!(percentile(&sorted, 0.99), 100);
        assert_eq!(percentile(&sorted, 0.0), 1);
    }

    #[test]
    fn test_percentile_clamps_to_last() {
        let sorted = [10, 20, 30];
        assert_eq!(percentile(&sorted, 1.0), 30);
        assert_eq!(percentile(&sorted, 0.999), 30);
    }

    #[test]
    fn test_percentile_single_and_empty() {
        assert_eq!(percentile(&[7], 0.5), 7);
        assert_eq!(percentile(&[], 0.5), 0);
    }

    #[test]
    fn test_summarize_sorts_unordered_samples() {
        let mut samples = LatencySamples::with_capacity(10);
        for v in [50, 10, 40, 20, 30] {
            samples.record(v);
        }
        let summary = samples.summarize();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.min, 10);
        assert_eq!(summary.median, 30);
        assert_eq!(summary.p99, 50);
        assert_eq!(summary.max, 50);
        assert_eq!(samples.as_slice(), &[10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_summarize_empty() {
        let mut samples = LatencySamples::default();
        assert_eq!(samples.summarize(), LatencySummary::default());
    }

    #[test]
    fn test_record_within_capacity_does_not_grow() {
        let mut samples = LatencySamples::with_capacity(128);
        let cap = samples.capacity();
        for i in 0..128 {
            samples.record(i);
        }
        assert_eq!(samples.capacity(), cap);
        assert_eq!(samples.len(), 128);
    }

    #[test]
    fn test_histogram_counts_samples() {
        let mut samples = LatencySamples::with_capacity(4);
        for v in [100, 200, 300, 1_000_000] {
            samples.record(v);
        }
        let histogram = samples.histogram().unwrap();
        assert_eq!(histogram.len(), 4);
        assert_eq!(histogram.min(), 100);
        assert!(histogram.max() >= 1_000_000);
    }
}
