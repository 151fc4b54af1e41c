// Application layer - Poll cycle use case and the ports it depends on
pub mod clock;
pub mod data_source;
pub mod display;
pub mod poll_service;
pub mod scheduler;
