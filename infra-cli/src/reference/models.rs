use serde::Serialize;

/// Enabled / disabled / total counts for one category of rooms
///
/// Every field is optional: a missing column or an empty cell in the source
/// spreadsheet is kept as `None` rather than guessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoomCounts {
    pub enabled: Option<u32>,
    pub disabled: Option<u32>,
    pub total: Option<u32>,
}

impl RoomCounts {
    pub fn new(enabled: u32, disabled: u32, total: u32) -> Self {
        Self {
            enabled: Some(enabled),
            disabled: Some(disabled),
            total: Some(total),
        }
    }

    /// Reported total, missing treated as zero
    pub fn total_or_zero(&self) -> u32 {
        self.total.unwrap_or(0)
    }
}

/// One health facility, keyed by its CLUES code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facility {
    pub id: String,
    /// `None` when the facility has no match in the region table
    pub region: Option<String>,
    pub name: Option<String>,
    pub general_rooms: RoomCounts,
    pub specialty_rooms: RoomCounts,
    pub operating_rooms: RoomCounts,
}

impl Facility {
    pub const DEFAULT_NAME: &'static str = "Unidad de salud";

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(Self::DEFAULT_NAME)
    }

    /// Label shown in the facility selector
    pub fn option_label(&self) -> String {
        format!("{} - {}", self.id, self.display_name())
    }

    pub fn general_total(&self) -> u32 {
        self.general_rooms.total_or_zero()
    }

    pub fn specialty_total(&self) -> u32 {
        self.specialty_rooms.total_or_zero()
    }

    /// Consultation rooms according to the system: general + specialty
    pub fn consultation_total(&self) -> u32 {
        self.general_total().saturating_add(self.specialty_total())
    }

    pub fn operating_total(&self) -> Option<u32> {
        self.operating_rooms.total
    }
}

/// Entry of the facility selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityOption {
    pub id: String,
    pub label: String,
}

impl From<&Facility> for FacilityOption {
    fn from(facility: &Facility) -> Self {
        Self {
            id: facility.id.clone(),
            label: facility.option_label(),
        }
    }
}
