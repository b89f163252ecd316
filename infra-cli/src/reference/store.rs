use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use super::fixture::fixture_facilities;
use super::models::{Facility, FacilityOption};

/// Where the reference data came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Loaded from the configured spreadsheets
    Files {
        infrastructure: PathBuf,
        regions: PathBuf,
    },
    /// Built-in fixture, used because loading failed
    Fixture { reason: String },
}

impl DataSource {
    #[cfg(test)]
    pub fn is_fixture(&self) -> bool {
        matches!(self, Self::Fixture { .. })
    }
}

/// Immutable, in-memory facility table with region and id lookups
#[derive(Debug, Clone)]
pub struct ReferenceData {
    facilities: Vec<Facility>,
    by_id: HashMap<String, usize>,
    regions: Vec<String>,
    source: DataSource,
}

impl ReferenceData {
    /// Build the store from joined facility rows
    ///
    /// Rows keep their input order. If an id appears more than once the first
    /// row wins and the rest are dropped with a warning.
    pub fn new(rows: Vec<Facility>, source: DataSource) -> Self {
        let mut facilities = Vec::with_capacity(rows.len());
        let mut by_id = HashMap::with_capacity(rows.len());

        for facility in rows {
            if by_id.contains_key(&facility.id) {
                log::warn!("Duplicate facility id '{}' ignored", facility.id);
                continue;
            }
            by_id.insert(facility.id.clone(), facilities.len());
            facilities.push(facility);
        }

        let regions: BTreeSet<String> = facilities
            .iter()
            .filter_map(|f| f.region.clone())
            .collect();

        Self {
            facilities,
            by_id,
            regions: regions.into_iter().collect(),
            source,
        }
    }

    /// Store backed by the built-in fixture
    pub fn fixture(reason: impl Into<String>) -> Self {
        Self::new(
            fixture_facilities(),
            DataSource::Fixture {
                reason: reason.into(),
            },
        )
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Distinct region names, sorted ascending
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions.binary_search_by(|r| r.as_str().cmp(region)).is_ok()
    }

    /// Facilities of a region, in source order
    pub fn facilities_in_region(&self, region: &str) -> Vec<FacilityOption> {
        self.facilities
            .iter()
            .filter(|f| f.region.as_deref() == Some(region))
            .map(FacilityOption::from)
            .collect()
    }

    pub fn facility_detail(&self, id: &str) -> Option<&Facility> {
        self.by_id.get(id).and_then(|&idx| self.facilities.get(idx))
    }

    /// Facilities that did not match any region in the join
    pub fn unmatched_count(&self) -> usize {
        self.facilities.iter().filter(|f| f.region.is_none()).count()
    }
}
