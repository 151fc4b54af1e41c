// Port for the surfaces a poll cycle writes into
use crate::domain::chart::ChartData;
use crate::domain::metrics::Metric;
use async_trait::async_trait;
use serde::Serialize;

/// Text targets fed from one field of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextTarget {
    AnomalyStatus,
    PredictiveStatus,
    OeeResult,
}

impl TextTarget {
    pub fn id(&self) -> &'static str {
        match self {
            Self::AnomalyStatus => "anomaly-status",
            Self::PredictiveStatus => "predictive-status",
            Self::OeeResult => "oee-result",
        }
    }
}

/// Everything one successful poll cycle shows, applied in one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayUpdate {
    /// Latest raw readings, keyed by payload name.
    pub readings: Vec<(String, String)>,
    /// Re-rendered rolling charts, only for metrics that received a sample.
    pub charts: Vec<(Metric, ChartData)>,
    pub texts: Vec<(TextTarget, String)>,
    pub gauge: Option<f64>,
}

#[async_trait]
pub trait DisplaySurface: Send + Sync {
    /// Apply a cycle's update. Readers never observe part of an update.
    /// Readings whose key the surface has no slot for are ignored.
    async fn apply(&self, update: DisplayUpdate);
}
