use crate::domain::metrics::default_reading_keys;
use anyhow::ensure;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub source: SourceSettings,
    pub poll: PollSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    pub anomaly_path: String,
    pub maintenance_path: String,
    pub oee_path: String,
    /// Unset means the HTTP client's own default (no timeout).
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    pub interval_ms: u64,
    /// Zero is rejected when the config is deserialized.
    pub series_capacity: NonZeroUsize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    #[serde(default)]
    pub reading_keys: Vec<String>,
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.poll.interval_ms > 0, "poll.interval_ms must be positive");
        ensure!(!self.source.base_url.is_empty(), "source.base_url must be set");
        Ok(())
    }
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_config_from("config/dashboard")
}

/// Defaults, then the optional file at `path`, then `DASHBOARD_*` env vars
/// (nested keys joined with `__`, e.g. `DASHBOARD_SOURCE__BASE_URL`).
pub fn load_config_from(path: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("source.base_url", "http://127.0.0.1:5000")?
        .set_default("source.anomaly_path", "/detect_anomaly")?
        .set_default("source.maintenance_path", "/predict_maintenance")?
        .set_default("source.oee_path", "/calculate_oee")?
        .set_default("poll.interval_ms", 5000)?
        .set_default("poll.series_capacity", 10)?
        .set_default("display.reading_keys", default_reading_keys())?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
