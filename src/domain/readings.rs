// Payloads returned by the machine-health server, one per endpoint
use serde::Deserialize;
use std::collections::BTreeMap;

/// `GET /detect_anomaly`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AnomalyReport {
    #[serde(default)]
    pub status: Option<String>,
    /// Raw sensor readings keyed by display name. `null` means absent.
    #[serde(default)]
    pub data: Option<BTreeMap<String, Option<f64>>>,
}

/// `GET /predict_maintenance`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MaintenanceReport {
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /calculate_oee`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OeeReport {
    #[serde(rename = "OEE", default)]
    pub oee: Option<f64>,
}

/// The joined result of one successful poll cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollSnapshot {
    pub anomaly: AnomalyReport,
    pub maintenance: MaintenanceReport,
    pub oee: OeeReport,
}
