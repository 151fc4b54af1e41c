// Presentation layer - Display surface and the HTTP API over it
pub mod app_state;
pub mod handlers;
pub mod live_view;
