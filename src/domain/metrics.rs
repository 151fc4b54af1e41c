// Known vibration metrics reported by the anomaly endpoint
use serde::Serialize;

/// The five metrics that get a rolling chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    ZAxisPeakVelocity,
    XAxisPeakAcceleration,
    XAxisRmsVelocity,
    ZAxisPeakAcceleration,
    ZAxisRmsVelocity,
}

/// Reading reported alongside the charted metrics but never charted.
pub const TEMPERATURE_KEY: &str = "Temperature (°F)";

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::ZAxisPeakVelocity,
        Metric::XAxisPeakAcceleration,
        Metric::XAxisRmsVelocity,
        Metric::ZAxisPeakAcceleration,
        Metric::ZAxisRmsVelocity,
    ];

    /// Key used for this metric in the anomaly payload's `data` map.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ZAxisPeakVelocity => "Z-Axis Peak Velocity (mm/sec)",
            Self::XAxisPeakAcceleration => "X-Axis Peak Acceleration (G)",
            Self::XAxisRmsVelocity => "X-Axis RMS Velocity (in/sec)",
            Self::ZAxisPeakAcceleration => "Z-Axis Peak Acceleration (G)",
            Self::ZAxisRmsVelocity => "Z-Axis RMS Velocity (in/sec)",
        }
    }

    /// Identifier of the chart surface the series is drawn on.
    pub fn chart_id(&self) -> &'static str {
        match self {
            Self::ZAxisPeakVelocity => "zAxisVelocityChart",
            Self::XAxisPeakAcceleration => "xAxisAccelerationChart",
            Self::XAxisRmsVelocity => "xAxisVelocityChart",
            Self::ZAxisPeakAcceleration => "zAxisAccelerationChart",
            Self::ZAxisRmsVelocity => "zAxisRMSVelocityChart",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::ZAxisPeakVelocity => "blue",
            Self::XAxisPeakAcceleration => "red",
            Self::XAxisRmsVelocity => "orange",
            Self::ZAxisPeakAcceleration => "green",
            Self::ZAxisRmsVelocity => "purple",
        }
    }

    /// Look up a metric by its payload key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn from_chart_id(chart_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.chart_id() == chart_id)
    }
}

/// Reading keys shown by default: every charted metric plus temperature.
pub fn default_reading_keys() -> Vec<String> {
    Metric::ALL
        .iter()
        .map(|m| m.key().to_string())
        .chain(std::iter::once(TEMPERATURE_KEY.to_string()))
        .collect()
}
