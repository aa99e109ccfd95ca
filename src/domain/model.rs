use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Inbound,
    Outbound,
    Other,
}

impl Direction {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "inbound" => Direction::Inbound,
            "outbound" => Direction::Outbound,
            _ => Direction::Other,
        }
    }
}

/// One row of call-log input. Created by the loader, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub raw_timestamp: String,
    pub direction: Direction,
    pub from: String,
    pub to: String,
    pub duration_seconds: u64,
    pub source_file: String,
    /// Full original row, keyed by column header, for the detail sheet.
    pub raw: HashMap<String, String>,
}

impl CallRecord {
    pub fn involves(&self, user: &str) -> bool {
        self.from == user || self.to == user
    }

    /// The non-user call leg, the side a PBX rule is matched against.
    pub fn counterpart(&self, user: &str) -> &str {
        if self.to == user {
            &self.from
        } else {
            &self.to
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallLog {
    /// Ordered union of headers across all input files.
    pub headers: Vec<String>,
    pub records: Vec<CallRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbxGroup {
    pub name: String,
    pub count: u64,
    pub total_seconds: u64,
    pub avg_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct DetailRow {
    pub interaction: String,
    pub record: CallRecord,
}

/// Transform output: everything the report writer needs.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub groups: Vec<PbxGroup>,
    pub details: Vec<DetailRow>,
    pub headers: Vec<String>,
}

/// Render a duration as a compact H/M/S string, e.g. "1h 5m 30s".
pub fn format_duration(total_seconds: u64) -> String {
    if total_seconds == 0 {
        return "0s".to_string();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}
