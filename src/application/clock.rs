// Source of the time-of-day labels attached to chart samples
use chrono::Local;

pub trait Clock: Send + Sync {
    fn time_label(&self) -> String;
}

/// Wall clock in local time, formatted as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn time_label(&self) -> String {
        Local::now().format("%H:%M:%S").to_string()
    }
}
