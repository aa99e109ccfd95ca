use crate::core::loader::{DURATION_COLUMN, TIMESTAMP_COLUMN};
use crate::domain::model::{format_duration, DetailRow, ReportData};
use crate::utils::error::Result;
use chrono_tz::Tz;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

const WIDTH_FACTOR: f64 = 1.2;
const MAX_COLUMN_WIDTH: f64 = 60.0;
const CALL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

enum Cell {
    Text(String),
    Number(u64),
}

impl Cell {
    fn rendered_len(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            Cell::Number(n) => n.to_string().len(),
        }
    }
}

/// Renders the summary and detail sheets into one XLSX workbook.
///
/// The workbook is assembled fully in memory and saved once at the end, so a
/// failed run leaves no partial output file.
pub struct ReportWriter {
    timezone: Tz,
}

impl ReportWriter {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn write(&self, data: &ReportData, output: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let summary_headers = summary_headers();
        let summary_rows = summary_rows(data);
        let sheet = workbook.add_worksheet();
        sheet.set_name("summary")?;
        write_sheet(sheet, &header_format, &summary_headers, &summary_rows)?;

        let detail_headers = self.detail_headers(data);
        let detail_rows = self.detail_rows(data);
        let sheet = workbook.add_worksheet();
        sheet.set_name("detail")?;
        write_sheet(sheet, &header_format, &detail_headers, &detail_rows)?;

        workbook.save(output)?;
        tracing::debug!(
            "Wrote {} summary row(s) and {} detail row(s) to {}",
            summary_rows.len(),
            detail_rows.len(),
            output.display()
        );
        Ok(())
    }

    fn detail_headers(&self, data: &ReportData) -> Vec<String> {
        let mut headers = vec![
            format!("Call Time ({})", self.timezone),
            "Interaction".to_string(),
            "Duration (Readable)".to_string(),
            "Duration (Seconds)".to_string(),
            "Source File".to_string(),
        ];
        headers.extend(
            data.headers
                .iter()
                .filter(|h| *h != TIMESTAMP_COLUMN && *h != DURATION_COLUMN)
                .cloned(),
        );
        headers
    }

    fn detail_rows(&self, data: &ReportData) -> Vec<Vec<Cell>> {
        data.details
            .iter()
            .map(|detail| self.detail_row(detail, &data.headers))
            .collect()
    }

    fn detail_row(&self, detail: &DetailRow, headers: &[String]) -> Vec<Cell> {
        let record = &detail.record;
        let call_time = match record.timestamp {
            Some(ts) => ts
                .with_timezone(&self.timezone)
                .format(CALL_TIME_FORMAT)
                .to_string(),
            None => record.raw_timestamp.clone(),
        };

        let mut row = vec![
            Cell::Text(call_time),
            Cell::Text(detail.interaction.clone()),
            Cell::Text(format_duration(record.duration_seconds)),
            Cell::Number(record.duration_seconds),
            Cell::Text(record.source_file.clone()),
        ];
        for header in headers {
            if header == TIMESTAMP_COLUMN || header == DURATION_COLUMN {
                continue;
            }
            row.push(Cell::Text(
                record.raw.get(header).cloned().unwrap_or_default(),
            ));
        }
        row
    }
}

fn summary_headers() -> Vec<String> {
    ["PBX", "Calls", "Total Duration", "Avg Duration"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn summary_rows(data: &ReportData) -> Vec<Vec<Cell>> {
    data.groups
        .iter()
        .map(|group| {
            vec![
                Cell::Text(group.name.clone()),
                Cell::Number(group.count),
                Cell::Text(format_duration(group.total_seconds)),
                Cell::Text(format_duration(group.avg_seconds)),
            ]
        })
        .collect()
}

fn write_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    headers: &[String],
    rows: &[Vec<Cell>],
) -> Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, header_format)?;
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            if cell.rendered_len() > widths[col] {
                widths[col] = cell.rendered_len();
            }
            match cell {
                Cell::Text(s) => sheet.write_string((i + 1) as u32, col as u16, s)?,
                Cell::Number(n) => sheet.write_number((i + 1) as u32, col as u16, *n as f64)?,
            };
        }
    }
    for (col, chars) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, fitted_width(*chars))?;
    }
    Ok(())
}

/// Column width from the longest rendered cell, capped.
fn fitted_width(max_chars: usize) -> f64 {
    (max_chars as f64 * WIDTH_FACTOR).min(MAX_COLUMN_WIDTH)
}
