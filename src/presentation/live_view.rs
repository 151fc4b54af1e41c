//! In-process display surface.
//!
//! Holds the latest text, readings, charts and OEE gauge written by poll
//! cycles, and hands out snapshots of them to the HTTP layer.

use crate::application::display::{DisplaySurface, DisplayUpdate, TextTarget};
use crate::domain::chart::ChartData;
use crate::domain::format::MISSING_READING;
use crate::domain::metrics::Metric;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

pub const OEE_CHART_ID: &str = "oeeChart";
const OEE_LABEL: &str = "OEE";
const OEE_COLOR: &str = "green";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Keyed by text target id, e.g. `anomaly-status`.
    pub texts: BTreeMap<String, String>,
    pub readings: BTreeMap<String, String>,
    pub charts: Vec<ChartData>,
    pub gauge: ChartData,
}

#[derive(Debug)]
struct ViewState {
    texts: BTreeMap<TextTarget, String>,
    readings: BTreeMap<String, String>,
    charts: BTreeMap<Metric, ChartData>,
    gauge: ChartData,
}

#[derive(Debug)]
pub struct LiveView {
    state: RwLock<ViewState>,
}

impl LiveView {
    /// `reading_keys` are the only readings this view has a slot for.
    pub fn new(reading_keys: &[String]) -> Self {
        let readings = reading_keys
            .iter()
            .map(|key| (key.clone(), MISSING_READING.to_string()))
            .collect();
        let charts = Metric::ALL
            .into_iter()
            .map(|metric| {
                let empty = ChartData::line(metric.chart_id(), metric.key(), metric.color(), Vec::new(), Vec::new());
                (metric, empty)
            })
            .collect();

        Self {
            state: RwLock::new(ViewState {
                texts: BTreeMap::new(),
                readings,
                charts,
                gauge: ChartData::gauge(OEE_CHART_ID, OEE_LABEL, OEE_COLOR, None),
            }),
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state.read().await;
        DashboardSnapshot {
            texts: state
                .texts
                .iter()
                .map(|(target, text)| (target.id().to_string(), text.clone()))
                .collect(),
            readings: state.readings.clone(),
            charts: state.charts.values().cloned().collect(),
            gauge: state.gauge.clone(),
        }
    }

    pub async fn text(&self, target: TextTarget) -> Option<String> {
        self.state.read().await.texts.get(&target).cloned()
    }

    /// Chart by surface id, including the OEE gauge.
    pub async fn chart(&self, chart_id: &str) -> Option<ChartData> {
        let state = self.state.read().await;
        if chart_id == OEE_CHART_ID {
            return Some(state.gauge.clone());
        }
        Metric::from_chart_id(chart_id).and_then(|metric| state.charts.get(&metric).cloned())
    }
}

#[async_trait]
impl DisplaySurface for LiveView {
    async fn apply(&self, update: DisplayUpdate) {
        let mut state = self.state.write().await;

        for (key, text) in update.readings {
            match state.readings.get_mut(&key) {
                Some(slot) => *slot = text,
                None => tracing::trace!("No display slot for reading {}", key),
            }
        }
        for (metric, chart) in update.charts {
            state.charts.insert(metric, chart);
        }
        for (target, text) in update.texts {
            state.texts.insert(target, text);
        }
        if let Some(value) = update.gauge {
            state.gauge = ChartData::gauge(OEE_CHART_ID, OEE_LABEL, OEE_COLOR, Some(value));
        }
    }
}
