//! Export of decoded positions to CSV and JSON files.

#[cfg(any(feature = "csv", feature = "json"))]
use crate::types::PositionRecord;
#[cfg(any(feature = "csv", feature = "json"))]
use std::path::Path;

#[cfg(feature = "csv")]
use crate::types::{
    KEY_ALARM, KEY_BATTERY, KEY_DRIVER_ID, KEY_INPUT, KEY_ODOMETER, KEY_OUTPUT, KEY_RSSI,
    KEY_SATELLITES,
};

#[cfg(feature = "csv")]
const CSV_HEADER: [&str; 16] = [
    "deviceId",
    "deviceTime",
    "fixTime",
    "valid",
    "latitude",
    "longitude",
    "speed",
    "course",
    "alarm",
    "input",
    "output",
    "odometer",
    "driverId",
    "battery",
    "rssi",
    "satellites",
];

#[cfg(feature = "csv")]
fn time_field(time: Option<chrono::DateTime<chrono::Utc>>) -> String {
    time.map(|t| t.to_rfc3339()).unwrap_or_default()
}

#[cfg(feature = "csv")]
fn integer_field(record: &PositionRecord, key: &str) -> String {
    record
        .integer_attribute(key)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

/// Write decoded positions to a CSV file, one row per record.
#[cfg(feature = "csv")]
pub fn export_to_csv(records: &[PositionRecord], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record([
            record.device_id.to_string(),
            time_field(record.device_time),
            time_field(record.fix_time),
            record.valid.to_string(),
            format!("{:.6}", record.latitude),
            format!("{:.6}", record.longitude),
            format!("{:.1}", record.speed),
            format!("{:.1}", record.course),
            record.text_attribute(KEY_ALARM).unwrap_or("").to_string(),
            record.text_attribute(KEY_INPUT).unwrap_or("").to_string(),
            record.text_attribute(KEY_OUTPUT).unwrap_or("").to_string(),
            integer_field(record, KEY_ODOMETER),
            record
                .text_attribute(KEY_DRIVER_ID)
                .unwrap_or("")
                .to_string(),
            integer_field(record, KEY_BATTERY),
            integer_field(record, KEY_RSSI),
            integer_field(record, KEY_SATELLITES),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write decoded positions to a pretty-printed JSON array.
#[cfg(feature = "json")]
pub fn export_to_json(records: &[PositionRecord], path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}
