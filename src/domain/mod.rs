// Domain layer - Dashboard data types and the rolling series invariant
pub mod chart;
pub mod format;
pub mod metrics;
pub mod readings;
pub mod rolling_series;
pub mod series_store;
