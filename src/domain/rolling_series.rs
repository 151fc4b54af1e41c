//! Fixed-capacity rolling window of time-stamped samples.
//!
//! Labels and values are kept in two parallel deques so they can be handed
//! to the chart layer as-is. Both always have the same length, never more
//! than `capacity`.

use super::chart::ChartData;
use super::metrics::Metric;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Capacity used for every dashboard series unless configured otherwise.
pub const DEFAULT_SERIES_CAPACITY: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// One point on a rolling chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub timestamp: String,
    pub value: f64,
}

impl MetricSample {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RollingSeries {
    capacity: usize,
    labels: VecDeque<String>,
    values: VecDeque<f64>,
}

impl RollingSeries {
    pub fn new(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.get();
        Self {
            capacity,
            labels: VecDeque::with_capacity(capacity + 1),
            values: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append a sample, evicting the oldest one once over capacity.
    ///
    /// An absent value is a no-op. Returns whether a sample was recorded.
    pub fn append(&mut self, timestamp: &str, value: Option<f64>) -> bool {
        let Some(value) = value else {
            return false;
        };

        self.labels.push_back(timestamp.to_string());
        self.values.push_back(value);

        if self.values.len() > self.capacity {
            self.labels.pop_front();
            self.values.pop_front();
        }

        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn samples(&self) -> Vec<MetricSample> {
        self.labels
            .iter()
            .zip(self.values.iter())
            .map(|(label, value)| MetricSample::new(label.clone(), *value))
            .collect()
    }

    pub fn latest(&self) -> Option<MetricSample> {
        match (self.labels.back(), self.values.back()) {
            (Some(label), Some(value)) => Some(MetricSample::new(label.clone(), *value)),
            _ => None,
        }
    }

    pub fn to_chart_data(&self, metric: Metric) -> ChartData {
        ChartData::line(
            metric.chart_id(),
            metric.key(),
            metric.color(),
            self.labels.iter().cloned().collect(),
            self.values.iter().copied().collect(),
        )
    }
}
