// Per-metric rolling windows backing the dashboard charts
use super::metrics::Metric;
use super::rolling_series::RollingSeries;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

#[derive(Debug, Clone)]
pub struct SeriesStore {
    series: BTreeMap<Metric, RollingSeries>,
}

impl SeriesStore {
    /// One series per known metric, all sharing `capacity`.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let series = Metric::ALL
            .into_iter()
            .map(|metric| (metric, RollingSeries::new(capacity)))
            .collect();
        Self { series }
    }

    /// Returns whether a sample was recorded; absent values are skipped.
    pub fn append(&mut self, metric: Metric, timestamp: &str, value: Option<f64>) -> bool {
        self.series
            .get_mut(&metric)
            .map(|series| series.append(timestamp, value))
            .unwrap_or(false)
    }

    pub fn series(&self, metric: Metric) -> Option<&RollingSeries> {
        self.series.get(&metric)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &RollingSeries)> {
        self.series.iter().map(|(metric, series)| (*metric, series))
    }
}
