use anyhow::Result;
use std::fs;

const THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

pub fn get_cpu_temp() -> Result<String> {
    let temp_str = fs::read_to_string(THERMAL_ZONE)?;
    let millidegrees: i64 = temp_str.trim().parse()?;
    Ok(format_temperature(millidegrees))
}

// The kernel reports thermal zones in millidegrees Celsius
pub fn format_temperature(millidegrees: i64) -> String {
    format!("{:.1}C", millidegrees as f64 / 1000.0)
}
