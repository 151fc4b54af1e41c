// Poll service - One fetch-and-apply cycle against the machine-health server
use crate::application::clock::Clock;
use crate::application::data_source::{DataSource, FetchError};
use crate::application::display::{DisplaySurface, DisplayUpdate, TextTarget};
use crate::domain::format::{anomaly_status_text, format_reading, maintenance_status_text, oee_text};
use crate::domain::metrics::Metric;
use crate::domain::readings::PollSnapshot;
use crate::domain::rolling_series::MetricSample;
use crate::domain::series_store::SeriesStore;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What a successful cycle changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Metrics that received a sample, in chart order.
    pub appended: Vec<Metric>,
    /// Number of readings pushed to the latest-value display.
    pub readings: usize,
    /// Payload keys that matched no charted metric.
    pub unknown_keys: Vec<String>,
}

#[derive(Clone)]
pub struct PollService {
    source: Arc<dyn DataSource>,
    display: Arc<dyn DisplaySurface>,
    clock: Arc<dyn Clock>,
    store: Arc<Mutex<SeriesStore>>,
}

impl PollService {
    pub fn new(
        source: Arc<dyn DataSource>,
        display: Arc<dyn DisplaySurface>,
        clock: Arc<dyn Clock>,
        series_capacity: NonZeroUsize,
    ) -> Self {
        Self {
            source,
            display,
            clock,
            store: Arc::new(Mutex::new(SeriesStore::new(series_capacity))),
        }
    }

    /// Run a cycle, logging and swallowing any fetch failure.
    pub async fn run_cycle(&self) {
        match self.poll_once().await {
            Ok(report) => {
                tracing::debug!(
                    appended = report.appended.len(),
                    readings = report.readings,
                    "Poll cycle applied"
                );
            }
            Err(e) => {
                tracing::error!(endpoint = %e.endpoint(), "API Error: {}", e);
            }
        }
    }

    /// Fetch all three endpoints and apply them, or apply nothing at all.
    pub async fn poll_once(&self) -> Result<CycleReport, FetchError> {
        let snapshot = self.fetch_all().await?;
        Ok(self.apply(snapshot).await)
    }

    /// Current contents of one metric's rolling window.
    pub async fn samples(&self, metric: Metric) -> Vec<MetricSample> {
        let store = self.store.lock().await;
        store
            .series(metric)
            .map(|series| series.samples())
            .unwrap_or_default()
    }

    async fn fetch_all(&self) -> Result<PollSnapshot, FetchError> {
        let (anomaly, maintenance, oee) = futures::try_join!(
            self.source.detect_anomaly(),
            self.source.predict_maintenance(),
            self.source.calculate_oee(),
        )?;

        Ok(PollSnapshot {
            anomaly,
            maintenance,
            oee,
        })
    }

    async fn apply(&self, snapshot: PollSnapshot) -> CycleReport {
        let mut report = CycleReport::default();
        let mut update = DisplayUpdate::default();

        // Held until the display has the update, so overlapping cycles
        // reach the display in the order their samples entered the store.
        let mut store = self.store.lock().await;

        if let Some(data) = &snapshot.anomaly.data {
            update.readings = data
                .iter()
                .map(|(key, value)| (key.clone(), format_reading(*value)))
                .collect();
            report.readings = update.readings.len();

            report.unknown_keys = data
                .keys()
                .filter(|key| Metric::from_key(key).is_none())
                .cloned()
                .collect();
            if !report.unknown_keys.is_empty() {
                tracing::debug!("Not charting unknown readings: {:?}", report.unknown_keys);
            }

            let timestamp = self.clock.time_label();
            for metric in Metric::ALL {
                let value = data.get(metric.key()).copied().flatten();
                if !store.append(metric, &timestamp, value) {
                    continue;
                }
                if let Some(series) = store.series(metric) {
                    update.charts.push((metric, series.to_chart_data(metric)));
                }
                report.appended.push(metric);
            }
        }

        update.texts = vec![
            (
                TextTarget::AnomalyStatus,
                anomaly_status_text(snapshot.anomaly.status.as_deref()),
            ),
            (
                TextTarget::PredictiveStatus,
                maintenance_status_text(snapshot.maintenance.status.as_deref()),
            ),
            (TextTarget::OeeResult, oee_text(snapshot.oee.oee)),
        ];
        update.gauge = snapshot.oee.oee;

        self.display.apply(update).await;
        drop(store);

        report
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::data_source::Endpoint;
    use crate::domain::chart::ChartData;
    use crate::domain::readings::{AnomalyReport, MaintenanceReport, OeeReport};
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    #[derive(Default)]
    pub(crate) struct StubSource {
        pub anomaly: AnomalyReport,
        pub maintenance: MaintenanceReport,
        pub oee: OeeReport,
        pub failing: Option<Endpoint>,
    }

    impl StubSource {
        fn check(&self, endpoint: Endpoint) -> Result<(), FetchError> {
            if self.failing == Some(endpoint) {
                return Err(FetchError::Status {
                    endpoint,
                    status: 500,
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DataSource for StubSource {
        async fn detect_anomaly(&self) -> Result<AnomalyReport, FetchError> {
            self.check(Endpoint::Anomaly)?;
            Ok(self.anomaly.clone())
        }

        async fn predict_maintenance(&self) -> Result<MaintenanceReport, FetchError> {
            self.check(Endpoint::Maintenance)?;
            Ok(self.maintenance.clone())
        }

        async fn calculate_oee(&self) -> Result<OeeReport, FetchError> {
            self.check(Endpoint::Oee)?;
            Ok(self.oee.clone())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DisplayEvent {
        Text(TextTarget, String),
        Reading(String, String),
        Series(Metric, ChartData),
        Gauge(f64),
    }

    #[derive(Default)]
    pub(crate) struct RecordingDisplay {
        pub updates: Mutex<Vec<DisplayUpdate>>,
    }

    impl RecordingDisplay {
        /// Every applied update, flattened in application order.
        pub async fn events(&self) -> Vec<DisplayEvent> {
            let updates = self.updates.lock().await;
            let mut events = Vec::new();
            for update in updates.iter() {
                for (key, text) in &update.readings {
                    events.push(DisplayEvent::Reading(key.clone(), text.clone()));
                }
                for (metric, chart) in &update.charts {
                    events.push(DisplayEvent::Series(*metric, chart.clone()));
                }
                for (target, text) in &update.texts {
                    events.push(DisplayEvent::Text(*target, text.clone()));
                }
                if let Some(value) = update.gauge {
                    events.push(DisplayEvent::Gauge(value));
                }
            }
            events
        }
    }

    #[async_trait]
    impl DisplaySurface for RecordingDisplay {
        async fn apply(&self, update: DisplayUpdate) {
            self.updates.lock().await.push(update);
        }
    }

    pub(crate) struct FixedClock(pub &'static str);

    impl Clock for FixedClock {
        fn time_label(&self) -> String {
            self.0.to_string()
        }
    }

    fn anomaly(status: Option<&str>, data: &[(&str, Option<f64>)]) -> AnomalyReport {
        let data: BTreeMap<String, Option<f64>> = data
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        AnomalyReport {
            status: status.map(str::to_string),
            data: Some(data),
        }
    }

    fn healthy_source() -> StubSource {
        StubSource {
            anomaly: anomaly(Some("Normal"), &[("Z-Axis Peak Velocity (mm/sec)", Some(3.21))]),
            maintenance: MaintenanceReport {
                status: Some("OK".to_string()),
            },
            oee: OeeReport { oee: Some(0.8734) },
            failing: None,
        }
    }

    fn service(source: StubSource) -> (PollService, Arc<RecordingDisplay>) {
        let display = Arc::new(RecordingDisplay::default());
        let service = PollService::new(
            Arc::new(source),
            display.clone(),
            Arc::new(FixedClock("10:00:00")),
            NonZeroUsize::new(10).unwrap(),
        );
        (service, display)
    }

    fn text_of(events: &[DisplayEvent], target: TextTarget) -> Option<String> {
        events.iter().rev().find_map(|e| match e {
            DisplayEvent::Text(t, text) if *t == target => Some(text.clone()),
            _ => None,
        })
    }

    #[tokio::test]
    async fn test_end_to_end_cycle() {
        let (service, display) = service(healthy_source());

        let report = service.poll_once().await.unwrap();
        assert_eq!(report.appended, vec![Metric::ZAxisPeakVelocity]);
        assert_eq!(report.readings, 1);

        let events = display.events().await;
        assert_eq!(
            text_of(&events, TextTarget::AnomalyStatus).as_deref(),
            Some("Anomaly Status: Normal")
        );
        assert_eq!(
            text_of(&events, TextTarget::PredictiveStatus).as_deref(),
            Some("Predictive Maintenance Status: OK")
        );
        assert_eq!(text_of(&events, TextTarget::OeeResult).as_deref(), Some("OEE: 0.87"));
        assert!(events.contains(&DisplayEvent::Reading(
            "Z-Axis Peak Velocity (mm/sec)".to_string(),
            "3.21".to_string()
        )));
        assert!(events.contains(&DisplayEvent::Gauge(0.8734)));

        let samples = service.samples(Metric::ZAxisPeakVelocity).await;
        assert_eq!(samples, vec![MetricSample::new("10:00:00", 3.21)]);
        assert!(service.samples(Metric::ZAxisRmsVelocity).await.is_empty());
    }

    #[tokio::test]
    async fn test_any_failure_discards_whole_cycle() {
        for endpoint in [Endpoint::Anomaly, Endpoint::Maintenance, Endpoint::Oee] {
            let mut source = healthy_source();
            source.failing = Some(endpoint);
            let (service, display) = service(source);

            let err = service.poll_once().await.unwrap_err();
            assert_eq!(err.endpoint(), endpoint);
            assert!(display.updates.lock().await.is_empty(), "{:?}", endpoint);
            for metric in Metric::ALL {
                assert!(service.samples(metric).await.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_run_cycle_swallows_failures() {
        let mut source = healthy_source();
        source.failing = Some(Endpoint::Oee);
        let (service, display) = service(source);

        service.run_cycle().await;
        assert!(display.updates.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_and_absent_readings() {
        let mut source = healthy_source();
        source.anomaly = anomaly(
            Some("Anomaly"),
            &[
                ("Temperature (°F)", Some(81.5)),
                ("X-Axis RMS Velocity (in/sec)", None),
                ("Z-Axis RMS Velocity (in/sec)", Some(0.051)),
            ],
        );
        let (service, display) = service(source);

        let report = service.poll_once().await.unwrap();
        assert_eq!(report.appended, vec![Metric::ZAxisRmsVelocity]);
        assert_eq!(report.unknown_keys, vec!["Temperature (°F)".to_string()]);
        assert_eq!(report.readings, 3);

        let events = display.events().await;
        assert!(events.contains(&DisplayEvent::Reading(
            "Temperature (°F)".to_string(),
            "81.50".to_string()
        )));
        assert!(events.contains(&DisplayEvent::Reading(
            "X-Axis RMS Velocity (in/sec)".to_string(),
            "--".to_string()
        )));
        let rendered: Vec<Metric> = events
            .iter()
            .filter_map(|e| match e {
                DisplayEvent::Series(m, _) => Some(*m),
                _ => None,
            })
            .collect();
        assert_eq!(rendered, vec![Metric::ZAxisRmsVelocity]);

        assert!(service.samples(Metric::XAxisRmsVelocity).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_show_no_data() {
        let source = StubSource::default();
        let (service, display) = service(source);

        let report = service.poll_once().await.unwrap();
        assert_eq!(report, CycleReport::default());

        let events = display.events().await;
        assert_eq!(
            events,
            vec![
                DisplayEvent::Text(TextTarget::AnomalyStatus, "Anomaly Status: No Data".to_string()),
                DisplayEvent::Text(
                    TextTarget::PredictiveStatus,
                    "Predictive Maintenance Status: No Data".to_string()
                ),
                DisplayEvent::Text(TextTarget::OeeResult, "OEE: No Data".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_series_stays_bounded_across_cycles() {
        let (service, display) = service(healthy_source());

        for _ in 0..11 {
            service.poll_once().await.unwrap();
        }

        assert_eq!(service.samples(Metric::ZAxisPeakVelocity).await.len(), 10);
        let events = display.events().await;
        let last_chart = events
            .iter()
            .rev()
            .find_map(|e| match e {
                DisplayEvent::Series(_, chart) => Some(chart.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_chart.labels.len(), 10);
        assert_eq!(last_chart.datasets[0].data.len(), 10);
    }

    #[tokio::test]
    async fn test_cycle_reaches_display_as_one_update() {
        let mut source = healthy_source();
        source.anomaly = anomaly(
            Some("Normal"),
            &[
                ("Z-Axis Peak Velocity (mm/sec)", Some(3.21)),
                ("X-Axis Peak Acceleration (G)", Some(0.5)),
                ("Temperature (°F)", Some(78.0)),
            ],
        );
        let (service, display) = service(source);

        service.poll_once().await.unwrap();

        let updates = display.updates.lock().await;
        assert_eq!(updates.len(), 1);
        let update = &updates[0];
        assert_eq!(update.readings.len(), 3);
        let charted: Vec<Metric> = update.charts.iter().map(|(m, _)| *m).collect();
        assert_eq!(
            charted,
            vec![Metric::ZAxisPeakVelocity, Metric::XAxisPeakAcceleration]
        );
        assert_eq!(update.texts.len(), 3);
        assert_eq!(update.gauge, Some(0.8734));
    }
}
