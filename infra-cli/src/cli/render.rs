//! Plain terminal rendering of wizard views
//!
//! Every function returns a `String`; callers decide where to print it.
//! Widths are measured on the uncolored text so accented labels line up.

use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::reference::DataSource;
use crate::wizard::logic::schedule::ScheduleTable;
use crate::wizard::view::{FacilitySummary, RoomCountView, ScheduleView, WizardView};
use crate::wizard::{Notification, WizardStep};

const STEP_COUNT: u8 = 4;

/// Warning shown when the built-in fixture replaced the spreadsheets
pub fn data_source_banner(source: &DataSource) -> Option<String> {
    match source {
        DataSource::Files { .. } => None,
        DataSource::Fixture { reason } => Some(format!(
            "{} {}\n  {}",
            "⚠".yellow().bold(),
            "Usando datos de ejemplo: no se pudieron cargar los archivos de infraestructura"
                .yellow()
                .bold(),
            reason.dimmed()
        )),
    }
}

pub fn step_header(step: WizardStep) -> String {
    format!(
        "{} {}",
        format!("[{}/{}]", step.number(), STEP_COUNT).dimmed(),
        step.label().bold()
    )
}

pub fn notification(notification: Notification) -> String {
    format!("{} {}", "✓".green().bold(), notification.message().green())
}

/// Aligned `label: value` lines of the selected facility
pub fn facility_panel(summary: &FacilitySummary) -> String {
    let lines = summary.lines();
    let width = lines.iter().map(|(label, _)| label.width()).max().unwrap_or(0);

    let mut out = format!("{}\n", summary.name.bold());
    for (label, value) in lines {
        out.push_str(&format!("  {}  {}\n", pad(label, width).cyan(), value));
    }
    out
}

pub fn room_count_panel(view: &RoomCountView) -> String {
    let total = view
        .system_total
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut out = format!("Consultorios en sistema: {}\n", total.bold());
    if view.answer.label().is_empty() {
        return out;
    }
    out.push_str(&format!("¿Coincide con la realidad?: {}\n", view.answer.label()));
    if view.override_visible {
        let value = view
            .override_value
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("Número real de consultorios: {}\n", value));
    }
    if let Some(count) = view.confirmed_count {
        out.push_str(&format!("Consultorios confirmados: {}\n", count));
    }
    out
}

/// Grid of shifts by days, blank where nothing is assigned
pub fn schedule_table(table: &ScheduleTable) -> String {
    let header = table.header();
    let rows = table.text_rows();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }

    let join = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(" │ ")
    };
    let rule: String = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");

    let mut out = format!("{}\n", table.title().bold());
    out.push_str(&format!("{}\n", join(header.as_slice()).bold()));
    out.push_str(&rule);
    out.push('\n');
    for row in &rows {
        out.push_str(&join(row.as_slice()));
        out.push('\n');
    }
    out
}

pub fn schedule_panel(view: &ScheduleView) -> String {
    let mut out = format!("{}\n", view.available_message().cyan());
    for service in &view.available {
        out.push_str(&format!("  - {}\n", service.label()));
    }
    out.push('\n');
    out.push_str(&schedule_table(&view.table));
    out
}

/// Everything visible in the view, section by section
pub fn session_summary(view: &WizardView) -> String {
    let mut out = step_header(view.step);
    out.push('\n');

    let region = view.selected_region.as_deref().unwrap_or("-");
    out.push_str(&format!("Entidad: {}\n", region));
    match &view.facility_summary {
        Some(summary) => out.push_str(&facility_panel(summary)),
        None => out.push_str("Unidad: -\n"),
    }
    out.push('\n');
    out.push_str(&room_count_panel(&view.room_count));

    if let Some(services) = &view.services {
        out.push('\n');
        for room in &services.rooms {
            let labels: Vec<&str> = room.selected.iter().map(|s| s.label()).collect();
            let listed = if labels.is_empty() {
                "-".to_string()
            } else {
                labels.join(", ")
            };
            out.push_str(&format!("{}: {}\n", room.room.label().bold(), listed));
        }
    }

    if let Some(schedule) = &view.schedule {
        out.push('\n');
        out.push_str(&schedule_panel(schedule));
    }

    if let Some(n) = view.notification {
        out.push('\n');
        out.push_str(&notification(n));
        out.push('\n');
    }
    out
}

/// Right-pad to a display width
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}
