//! Prometheus latency histograms.
//!
//! Names follow `<protocol>_request_duration_seconds` with a single label
//! (`path` for HTTP routes, `method` for RPCs) and the Prometheus default
//! buckets. Each [`LatencyHistogram`] owns its registry; nothing is registered
//! globally.
//!
//! Observation and export never block each other: samples accumulate in
//! atomics inside the `prometheus` crate and `gather` reads them in place.

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, Registry, TextEncoder, DEFAULT_BUCKETS,
};
use std::time::Instant;

use crate::TelemetryError;

/// A labeled latency histogram with its own registry.
#[derive(Clone)]
pub struct LatencyHistogram {
    name: String,
    registry: Registry,
    histogram: HistogramVec,
}

impl LatencyHistogram {
    /// Create the histogram and register it with a fresh registry.
    pub fn new(name: &str, help: &str, label: &str) -> Result<Self, TelemetryError> {
        let histogram = HistogramVec::new(
            HistogramOpts::new(name, help).buckets(DEFAULT_BUCKETS.to_vec()),
            &[label],
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        let registry = Registry::new();
        registry
            .register(Box::new(histogram.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            registry,
            histogram,
        })
    }

    /// Record one observation, in seconds, under `label_value`.
    pub fn observe(&self, label_value: &str, seconds: f64) {
        self.histogram
            .with_label_values(&[label_value])
            .observe(seconds);
    }

    /// Start a timer that observes under `label_value` when dropped.
    pub fn start_timer(&self, label_value: &str) -> HistogramTimer {
        HistogramTimer::new(&self.histogram.with_label_values(&[label_value]))
    }

    /// Number of observations recorded under `label_value`.
    ///
    /// Reads the gathered snapshot so that querying an unseen label does not
    /// create an empty series.
    pub fn sample_count(&self, label_value: &str) -> u64 {
        let families = self.registry.gather();
        families
            .iter()
            .filter(|family| family.get_name() == self.name)
            .flat_map(|family| family.get_metric().iter())
            .filter(|metric| {
                metric
                    .get_label()
                    .iter()
                    .any(|pair| pair.get_value() == label_value)
            })
            .map(|metric| metric.get_histogram().get_sample_count())
            .sum()
    }

    /// Encode the registry in Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
    }

    /// Content type of [`encode`](Self::encode) output.
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
