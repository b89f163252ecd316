//! Spreadsheet export of the room schedules
//!
//! Every assigned slot of every room becomes one row
//! `(Consultorio, Día, Turno, Servicio)`. Empty slots produce no row.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use serde::Serialize;

use crate::catalog::RoomId;

use super::schedule::ScheduleGrid;

pub const HEADERS: [&str; 4] = ["Consultorio", "Día", "Turno", "Servicio"];
const SHEET_NAME: &str = "Horarios";
const FILE_PREFIX: &str = "horarios_consultorios";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub room: String,
    pub day: String,
    pub shift: String,
    pub service: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 4] {
        [&self.room, &self.day, &self.shift, &self.service]
    }
}

/// Rows ready to be written, produced by the wizard's export action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub rows: Vec<ExportRow>,
}

/// Flatten room schedules into export rows, ordered by room, day, shift
pub fn build_export_rows<'a>(
    rooms: impl IntoIterator<Item = (RoomId, &'a ScheduleGrid)>,
) -> Vec<ExportRow> {
    let mut rooms: Vec<_> = rooms.into_iter().collect();
    rooms.sort_by_key(|(room, _)| *room);

    rooms
        .into_iter()
        .flat_map(|(room, grid)| {
            grid.iter().map(move |(slot, service)| ExportRow {
                room: room.label(),
                day: slot.day.label().to_string(),
                shift: slot.shift.label().to_string(),
                service: service.label().to_string(),
            })
        })
        .collect()
}

/// `horarios_consultorios_YYYYMMDD_HHMMSS.xlsx`
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("{}_{}.xlsx", FILE_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// Serialize rows into an `.xlsx` workbook held in memory
pub fn write_workbook(rows: &[ExportRow]) -> Result<Vec<u8>> {
    if rows.is_empty() {
        bail!("No schedule rows to export");
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x611232))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, value) in row.cells().iter().enumerate() {
            sheet.write_string(row_num, col as u16, *value)?;
            widths[col] = widths[col].max(value.chars().count());
        }
    }

    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, (*width + 2) as f64)?;
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize schedule workbook")
}

/// Write the export into `dir`, named after `now`
pub fn save_export(request: &ExportRequest, dir: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    let bytes = write_workbook(&request.rows)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(export_filename(now));
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!(
        "Exported {} schedule rows to: {}",
        request.rows.len(),
        path.display()
    );
    Ok(path)
}
