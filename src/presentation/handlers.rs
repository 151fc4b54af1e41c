// HTTP request handlers
use crate::domain::chart::ChartData;
use crate::presentation::app_state::AppState;
use crate::presentation::live_view::DashboardSnapshot;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Everything currently on the dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.view.snapshot().await)
}

/// One chart, in the shape the charting library expects
pub async fn get_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartData>, StatusCode> {
    match state.view.chart(&id).await {
        Some(chart) => Ok(Json(chart)),
        None => {
            tracing::debug!("Unknown chart requested: {}", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
