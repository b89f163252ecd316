//! Read facility infrastructure and region spreadsheets
//!
//! Both files are `.xlsx` workbooks whose first worksheet starts with a
//! header row. Columns are located by header name so the order in the file
//! does not matter; only `clues_imb` is mandatory.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::models::{Facility, RoomCounts};
use super::store::{DataSource, ReferenceData};

/// Header names in the source spreadsheets
mod cols {
    pub const FACILITY_ID: &str = "clues_imb";
    pub const REGION: &str = "entidad";
    pub const NAME: &str = "nombre_de_la_unidad";

    pub const GENERAL_ENABLED: &str = "consultorios_generales_habilitados";
    pub const GENERAL_DISABLED: &str = "consultorios_generales_inhabilitados";
    pub const GENERAL_TOTAL: &str = "total_consultorios_generales";

    pub const SPECIALTY_ENABLED: &str = "consultorios_de_especialidad_habilitados";
    pub const SPECIALTY_DISABLED: &str = "consultorios_de_especialidad_inhabilitados";
    pub const SPECIALTY_TOTAL: &str = "total_consultorios_de_especialidad";

    pub const OPERATING_ENABLED: &str = "quirofanos_habilitados";
    pub const OPERATING_DISABLED: &str = "quirofanos_inhabilitados";
    pub const OPERATING_TOTAL: &str = "total_de_quirofanos";
}

/// Load and join both spreadsheets, falling back to the fixture on failure
pub fn load_reference_data(infrastructure: &Path, regions: &Path) -> ReferenceData {
    match load_joined(infrastructure, regions) {
        Ok(rows) => {
            let data = ReferenceData::new(
                rows,
                DataSource::Files {
                    infrastructure: infrastructure.to_path_buf(),
                    regions: regions.to_path_buf(),
                },
            );
            log::info!(
                "Reference data loaded: {} facilities in {} regions",
                data.len(),
                data.regions().len()
            );
            log::debug!("Regions: {:?}", data.regions());
            if data.unmatched_count() > 0 {
                log::warn!(
                    "{} facilities have no region in {}",
                    data.unmatched_count(),
                    regions.display()
                );
            }
            data
        }
        Err(e) => {
            log::error!(
                "Failed to load reference data, using built-in fixture instead: {:#}",
                e
            );
            ReferenceData::fixture(format!("{:#}", e))
        }
    }
}

/// Left join of the infrastructure table with the region table on the facility id
pub fn load_joined(infrastructure: &Path, regions: &Path) -> Result<Vec<Facility>> {
    let infra = read_sheet(infrastructure)?;
    let region_table = read_sheet(regions)?;

    let region_by_id = build_region_index(&region_table)
        .with_context(|| format!("Invalid region table: {}", regions.display()))?;

    let id_col = infra
        .column(cols::FACILITY_ID)
        .with_context(|| format!("Invalid infrastructure table: {}", infrastructure.display()))?;

    let counts = |row: &[Data], enabled: &str, disabled: &str, total: &str| RoomCounts {
        enabled: infra.column_index(enabled).and_then(|c| cell_count(row.get(c))),
        disabled: infra.column_index(disabled).and_then(|c| cell_count(row.get(c))),
        total: infra.column_index(total).and_then(|c| cell_count(row.get(c))),
    };
    let name_col = infra.column_index(cols::NAME);

    let mut facilities = Vec::with_capacity(infra.rows.len());
    for row in &infra.rows {
        let Some(id) = cell_string(row.get(id_col)) else {
            continue;
        };

        facilities.push(Facility {
            region: region_by_id.get(&id).cloned(),
            name: name_col.and_then(|c| cell_string(row.get(c))),
            general_rooms: counts(
                row,
                cols::GENERAL_ENABLED,
                cols::GENERAL_DISABLED,
                cols::GENERAL_TOTAL,
            ),
            specialty_rooms: counts(
                row,
                cols::SPECIALTY_ENABLED,
                cols::SPECIALTY_DISABLED,
                cols::SPECIALTY_TOTAL,
            ),
            operating_rooms: counts(
                row,
                cols::OPERATING_ENABLED,
                cols::OPERATING_DISABLED,
                cols::OPERATING_TOTAL,
            ),
            id,
        });
    }

    Ok(facilities)
}

fn build_region_index(table: &Sheet) -> Result<HashMap<String, String>> {
    let id_col = table.column(cols::FACILITY_ID)?;
    let region_col = table.column(cols::REGION)?;

    let mut index = HashMap::with_capacity(table.rows.len());
    for row in &table.rows {
        let (Some(id), Some(region)) = (
            cell_string(row.get(id_col)),
            cell_string(row.get(region_col)),
        ) else {
            continue;
        };
        if let Some(existing) = index.get(&id) {
            if existing != &region {
                log::warn!(
                    "Facility '{}' mapped to both '{}' and '{}', keeping '{}'",
                    id,
                    existing,
                    region,
                    existing
                );
            }
            continue;
        }
        index.insert(id, region);
    }
    Ok(index)
}

/// First worksheet of a workbook, split into header and data rows
struct Sheet {
    name: String,
    headers: HashMap<String, usize>,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.get(name).copied()
    }

    fn column(&self, name: &str) -> Result<usize> {
        match self.column_index(name) {
            Some(idx) => Ok(idx),
            None => bail!("Sheet '{}' has no '{}' column", self.name, name),
        }
    }
}

fn read_sheet(path: &Path) -> Result<Sheet> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Excel file has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows = range.rows();
    let headers: HashMap<String, usize> = rows
        .next()
        .map(|header| {
            header
                .iter()
                .enumerate()
                .filter_map(|(idx, cell)| {
                    cell_string(Some(cell)).map(|name| (name.to_lowercase(), idx))
                })
                .collect()
        })
        .unwrap_or_default();

    let rows: Vec<Vec<Data>> = rows.map(|row| row.to_vec()).collect();
    log::debug!(
        "Read {} rows from '{}' in {}",
        rows.len(),
        sheet_name,
        path.display()
    );

    Ok(Sheet {
        name: sheet_name,
        headers,
        rows,
    })
}

/// Trimmed text of a cell; empty cells become `None`
fn cell_string(cell: Option<&Data>) -> Option<String> {
    let text = match cell? {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Non-negative whole number in a cell
fn cell_count(cell: Option<&Data>) -> Option<u32> {
    match cell? {
        Data::Int(i) => u32::try_from(*i).ok(),
        Data::Float(f) => float_count(*f),
        Data::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_count))
        }
        _ => None,
    }
}

fn float_count(f: f64) -> Option<u32> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX)).then(|| f as u32)
}
