// Port for the machine-health server's three read endpoints
use crate::domain::readings::{AnomalyReport, MaintenanceReport, OeeReport};
use async_trait::async_trait;
use std::fmt;

/// Which of the three endpoints a result or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Anomaly,
    Maintenance,
    Oee,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Anomaly => "Anomaly Data",
            Self::Maintenance => "Predictive Maintenance Data",
            Self::Oee => "OEE Data",
        };
        f.write_str(name)
    }
}

/// The one failure kind of a poll cycle.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to fetch {endpoint}: {reason}")]
    Transport { endpoint: Endpoint, reason: String },

    #[error("Failed to fetch {endpoint}: status {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("Failed to parse {endpoint}: {reason}")]
    Parse { endpoint: Endpoint, reason: String },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Parse { endpoint, .. } => *endpoint,
        }
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    /// `GET /detect_anomaly`
    async fn detect_anomaly(&self) -> Result<AnomalyReport, FetchError>;

    /// `GET /predict_maintenance`
    async fn predict_maintenance(&self) -> Result<MaintenanceReport, FetchError>;

    /// `GET /calculate_oee`
    async fn calculate_oee(&self) -> Result<OeeReport, FetchError>;
}
