// Text formatting for the dashboard's display targets

/// Placeholder shown for a reading with no value.
pub const MISSING_READING: &str = "--";
/// Placeholder shown for a status or summary field with no value.
pub const NO_DATA: &str = "No Data";

pub fn format_reading(value: Option<f64>) -> String {
    match value {
        Some(v) => to_fixed_2(v),
        None => MISSING_READING.to_string(),
    }
}

pub fn anomaly_status_text(status: Option<&str>) -> String {
    format!("Anomaly Status: {}", status_or_no_data(status))
}

pub fn maintenance_status_text(status: Option<&str>) -> String {
    format!("Predictive Maintenance Status: {}", status_or_no_data(status))
}

pub fn oee_text(oee: Option<f64>) -> String {
    match oee {
        Some(v) => format!("OEE: {}", to_fixed_2(v)),
        None => format!("OEE: {}", NO_DATA),
    }
}

/// Two decimals, with values exactly halfway between hundredths rounded
/// away from zero (`0.125` -> `0.13`). Everything else is rounded to nearest.
pub fn to_fixed_2(value: f64) -> String {
    // Exact halfway points are the odd multiples of 1/8; scaling by 8 is exact.
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return format!("{:.2}", (value * 100.0).round() / 100.0);
    }
    format!("{:.2}", value)
}

// An empty status string counts as missing.
fn status_or_no_data(status: Option<&str>) -> &str {
    match status {
        Some(s) if !s.is_empty() => s,
        _ => NO_DATA,
    }
}
