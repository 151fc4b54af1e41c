// Application state for HTTP handlers
use crate::presentation::live_view::LiveView;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub view: Arc<LiveView>,
}
