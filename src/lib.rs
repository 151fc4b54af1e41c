// Machine-health dashboard - polls the anomaly, maintenance and OEE endpoints
// and keeps rolling chart windows of the vibration readings.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
