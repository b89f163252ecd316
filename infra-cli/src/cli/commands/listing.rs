//! Read-only listings of the reference data

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::cli::render;
use crate::reference::{FacilityOption, ReferenceData};
use crate::wizard::view::FacilitySummary;

pub fn handle_regions(data: &ReferenceData, format: OutputFormat) -> Result<()> {
    print!("{}", format_regions(data, format)?);
    Ok(())
}

pub fn handle_facilities(data: &ReferenceData, region: &str, format: OutputFormat) -> Result<()> {
    if !data.has_region(region) {
        log::warn!("Region '{}' not found", region);
    }
    print!("{}", format_facilities(&data.facilities_in_region(region), format)?);
    Ok(())
}

pub fn handle_facility(data: &ReferenceData, id: &str, format: OutputFormat) -> Result<()> {
    match data.facility_detail(id).map(FacilitySummary::from) {
        Some(summary) => print!("{}", format_facility(&summary, format)?),
        None => println!("{} {}", "Unidad no encontrada:".yellow(), id),
    }
    Ok(())
}

pub fn format_regions(data: &ReferenceData, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut out = format!("{}\n", "Entidad".bold());
            for region in data.regions() {
                out.push_str(&format!("{}\n", region));
            }
            Ok(out)
        }
        OutputFormat::Json => to_json(data.regions()),
        OutputFormat::Csv => to_csv(&["entidad"], data.regions().iter().map(|r| vec![r.clone()])),
    }
}

pub fn format_facilities(options: &[FacilityOption], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut out = String::new();
            for option in options {
                out.push_str(&format!("{}  {}\n", option.id.cyan(), option.label));
            }
            if options.is_empty() {
                out.push_str("Sin unidades\n");
            }
            Ok(out)
        }
        OutputFormat::Json => to_json(options),
        OutputFormat::Csv => to_csv(
            &["clues", "etiqueta"],
            options.iter().map(|o| vec![o.id.clone(), o.label.clone()]),
        ),
    }
}

pub fn format_facility(summary: &FacilitySummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render::facility_panel(summary)),
        OutputFormat::Json => to_json(summary),
        OutputFormat::Csv => to_csv(
            &["campo", "valor"],
            summary
                .lines()
                .into_iter()
                .map(|(label, value)| vec![label.to_string(), value]),
        ),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to format JSON output")?;
    json.push('\n');
    Ok(json)
}

fn to_csv(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(headers)
        .context("Failed to write CSV header")?;
    for row in rows {
        wtr.write_record(&row).context("Failed to write CSV row")?;
    }
    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
