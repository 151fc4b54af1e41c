// HTTP client for the machine-health server's JSON endpoints
use crate::application::data_source::{DataSource, Endpoint, FetchError};
use crate::domain::readings::{AnomalyReport, MaintenanceReport, OeeReport};
use crate::infrastructure::config::SourceSettings;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
    anomaly_path: String,
    maintenance_path: String,
    oee_path: String,
}

impl HttpDataSource {
    pub fn new(settings: &SourceSettings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = settings.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            anomaly_path: settings.anomaly_path.clone(),
            maintenance_path: settings.maintenance_path.clone(),
            oee_path: settings.oee_path.clone(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, endpoint: Endpoint, path: &str) -> Result<T, FetchError> {
        let url = self.build_url(path);
        tracing::debug!("Fetching {} from {}", endpoint, url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                endpoint,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            endpoint,
            reason: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Parse {
            endpoint,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn detect_anomaly(&self) -> Result<AnomalyReport, FetchError> {
        self.fetch_json(Endpoint::Anomaly, &self.anomaly_path).await
    }

    async fn predict_maintenance(&self) -> Result<MaintenanceReport, FetchError> {
        self.fetch_json(Endpoint::Maintenance, &self.maintenance_path).await
    }

    async fn calculate_oee(&self) -> Result<OeeReport, FetchError> {
        self.fetch_json(Endpoint::Oee, &self.oee_path).await
    }
}
