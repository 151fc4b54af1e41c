// Chart payloads in the shape the charting library consumes
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub id: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn line(id: &str, label: &str, color: &str, labels: Vec<String>, data: Vec<f64>) -> Self {
        Self {
            id: id.to_string(),
            kind: ChartKind::Line,
            labels,
            datasets: vec![Dataset {
                label: label.to_string(),
                data,
                border_color: Some(color.to_string()),
                background_color: None,
            }],
        }
    }

    /// Single-slice gauge. An absent value leaves the slice empty.
    pub fn gauge(id: &str, label: &str, color: &str, value: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            kind: ChartKind::Doughnut,
            labels: vec![label.to_string()],
            datasets: vec![Dataset {
                label: label.to_string(),
                data: value.into_iter().collect(),
                border_color: None,
                background_color: Some(color.to_string()),
            }],
        }
    }
}
