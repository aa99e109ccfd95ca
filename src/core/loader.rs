use crate::domain::model::{CallLog, CallRecord, Direction};
use crate::utils::error::{ReportError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_COLUMN: &str = "Created at";
pub const DIRECTION_COLUMN: &str = "Direction";
pub const FROM_COLUMN: &str = "From";
pub const TO_COLUMN: &str = "To";
pub const DURATION_COLUMN: &str = "Duration (in seconds)";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    TIMESTAMP_COLUMN,
    DIRECTION_COLUMN,
    FROM_COLUMN,
    TO_COLUMN,
    DURATION_COLUMN,
];

/// Read every input file into one ordered sequence of records.
///
/// Rows keep their per-file order and files keep the order given. A file
/// missing a required column aborts the whole load.
pub fn load_csv_files(paths: &[PathBuf]) -> Result<CallLog> {
    let mut headers: Vec<String> = Vec::new();
    let mut records: Vec<CallRecord> = Vec::new();

    tracing::debug!("Loading {} input file(s)", paths.len());
    for path in paths {
        load_file(path, &mut headers, &mut records)?;
    }
    tracing::debug!("Loaded {} record(s) total", records.len());

    Ok(CallLog { headers, records })
}

fn load_file(path: &Path, headers: &mut Vec<String>, out: &mut Vec<CallRecord>) -> Result<()> {
    let file_name = path.display().to_string();
    let mut reader = csv::Reader::from_path(path)?;
    let file_headers = reader.headers()?.clone();

    for column in REQUIRED_COLUMNS {
        if !file_headers.iter().any(|h| h == column) {
            return Err(ReportError::MissingColumnError {
                file: file_name,
                column: column.to_string(),
            });
        }
    }

    for header in file_headers.iter() {
        if !headers.iter().any(|existing| existing == header) {
            headers.push(header.to_string());
        }
    }

    let mut loaded = 0usize;
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = row?;
        let raw: HashMap<String, String> = file_headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();

        let duration_field = raw.get(DURATION_COLUMN).cloned().unwrap_or_default();
        let duration_seconds = match duration_field.trim().parse::<u64>() {
            Ok(seconds) => seconds,
            Err(_) => {
                tracing::warn!(
                    "Skipping row with malformed duration '{}' in {}",
                    duration_field,
                    file_name
                );
                skipped += 1;
                continue;
            }
        };

        let raw_timestamp = raw.get(TIMESTAMP_COLUMN).cloned().unwrap_or_default();
        out.push(CallRecord {
            timestamp: parse_timestamp(&raw_timestamp),
            raw_timestamp,
            direction: Direction::parse(raw.get(DIRECTION_COLUMN).map_or("", String::as_str)),
            from: raw.get(FROM_COLUMN).cloned().unwrap_or_default(),
            to: raw.get(TO_COLUMN).cloned().unwrap_or_default(),
            duration_seconds,
            source_file: file_name.clone(),
            raw,
        });
        loaded += 1;
    }

    tracing::debug!(
        "{}: {} record(s) loaded, {} skipped",
        file_name,
        loaded,
        skipped
    );
    Ok(())
}

/// Best-effort timestamp parse; a failure leaves the record usable but unsorted.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%z") {
        return Some(ts.with_timezone(&Utc));
    }
    // Offset-free exports are assumed UTC.
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
