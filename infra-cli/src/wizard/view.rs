//! Render projection of the wizard
//!
//! [`WizardView::build`] is pure: it reads the state and the reference data
//! and returns everything a surface needs to draw, including which sections
//! are visible and which options each selector offers.

use serde::Serialize;

use crate::catalog::{Day, RoomId, Service, Shift};
use crate::reference::{Facility, FacilityOption, ReferenceData};

use super::logic::schedule::{ScheduleGrid, ScheduleTable};
use super::state::State;
use super::types::{CountAnswer, Notification, WizardStep};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub regions: Vec<String>,
    pub selected_region: Option<String>,
    pub facility: FacilitySelector,
    /// `None` until a known facility is selected
    pub facility_summary: Option<FacilitySummary>,
    pub room_count: RoomCountView,
    /// `None` until the room count is confirmed
    pub services: Option<ServicesView>,
    /// `None` until the services are saved
    pub schedule: Option<ScheduleView>,
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilitySelector {
    pub enabled: bool,
    pub options: Vec<FacilityOption>,
    pub selected: Option<String>,
}

/// Read-only details of the selected facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilitySummary {
    pub id: String,
    pub name: String,
    pub region: Option<String>,
    pub general_total: u32,
    pub specialty_total: u32,
    pub consultation_total: u32,
    pub operating_total: Option<u32>,
}

impl From<&Facility> for FacilitySummary {
    fn from(facility: &Facility) -> Self {
        Self {
            id: facility.id.clone(),
            name: facility.display_name().to_string(),
            region: facility.region.clone(),
            general_total: facility.general_total(),
            specialty_total: facility.specialty_total(),
            consultation_total: facility.consultation_total(),
            operating_total: facility.operating_total(),
        }
    }
}

impl FacilitySummary {
    /// `(label, value)` pairs of the summary panel
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("CLUES", self.id.clone()),
            (
                "Entidad",
                self.region.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
            ("Consultorios generales", self.general_total.to_string()),
            ("Consultorios especialidad", self.specialty_total.to_string()),
            ("Total consultorios", self.consultation_total.to_string()),
            (
                "Quirófanos",
                self.operating_total
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCountView {
    /// Absent until a facility is chosen
    pub system_total: Option<u32>,
    pub answer: CountAnswer,
    pub override_visible: bool,
    pub override_value: Option<u32>,
    pub continue_visible: bool,
    pub confirmed_count: Option<u32>,
    pub saved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicesView {
    pub catalog: Vec<Service>,
    pub rooms: Vec<RoomServicesView>,
    pub saved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomServicesView {
    pub room: RoomId,
    pub selected: Vec<Service>,
}

/// What the service selector of the schedule section shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ServiceSelector {
    /// Day or shift not chosen yet
    Hidden,
    /// Day and shift chosen but the room offers nothing
    NoServices,
    Options(Vec<Service>),
}

impl ServiceSelector {
    pub const EMPTY_MESSAGE: &'static str = "No hay servicios disponibles para este consultorio";

    #[cfg(test)]
    pub fn options(&self) -> &[Service] {
        match self {
            Self::Options(services) => services,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub active_room: RoomId,
    pub rooms: Vec<RoomId>,
    /// Services offered by the active room
    pub available: Vec<Service>,
    pub day: Option<Day>,
    pub shift: Option<Shift>,
    pub service: Option<Service>,
    pub service_selector: ServiceSelector,
    pub assign_visible: bool,
    pub table: ScheduleTable,
}

impl ScheduleView {
    /// Info line above the selectors
    pub fn available_message(&self) -> String {
        if self.available.is_empty() {
            format!("{}: No hay servicios seleccionados", self.active_room)
        } else {
            format!("{}: Servicios disponibles", self.active_room)
        }
    }
}

impl WizardView {
    pub fn build(state: &State, data: &ReferenceData) -> Self {
        let selected_region = state.selection.region.clone();
        let options = selected_region
            .as_deref()
            .map(|region| data.facilities_in_region(region))
            .unwrap_or_default();

        let facility = state
            .selection
            .facility_id
            .as_deref()
            .and_then(|id| data.facility_detail(id));

        Self {
            step: state.step(),
            regions: data.regions().to_vec(),
            facility: FacilitySelector {
                enabled: selected_region.is_some(),
                options,
                selected: state.selection.facility_id.clone(),
            },
            selected_region,
            facility_summary: facility.map(FacilitySummary::from),
            room_count: room_count_view(state, facility),
            services: state.room_count.saved.then(|| services_view(state)),
            schedule: state.services.saved.then(|| schedule_view(state)),
            notification: state.notification,
        }
    }
}

fn room_count_view(state: &State, facility: Option<&Facility>) -> RoomCountView {
    let rc = &state.room_count;
    let system_total = facility.map(Facility::consultation_total);

    RoomCountView {
        system_total,
        answer: rc.answer,
        override_visible: rc.override_visible(),
        override_value: rc.override_value,
        continue_visible: state.selection.facility_id.is_some() && rc.answer != CountAnswer::Unset,
        confirmed_count: rc.confirmed_count(system_total),
        saved: rc.saved,
    }
}

fn services_view(state: &State) -> ServicesView {
    ServicesView {
        catalog: Service::ALL.to_vec(),
        rooms: state
            .rooms
            .iter()
            .map(|room| RoomServicesView {
                room: room.id,
                selected: room.services.iter().copied().collect(),
            })
            .collect(),
        saved: state.services.saved,
    }
}

fn schedule_view(state: &State) -> ScheduleView {
    let sched = &state.schedule;
    let available: Vec<Service> = state
        .active_room_services()
        .map(|services| services.iter().copied().collect())
        .unwrap_or_default();

    let service_selector = match (sched.day, sched.shift) {
        (Some(_), Some(_)) if available.is_empty() => ServiceSelector::NoServices,
        (Some(_), Some(_)) => ServiceSelector::Options(available.clone()),
        _ => ServiceSelector::Hidden,
    };

    let table = state
        .room(sched.active_room)
        .map(|room| room.schedule.table(room.id))
        .unwrap_or_else(|| ScheduleGrid::new().table(sched.active_room));

    ScheduleView {
        active_room: sched.active_room,
        rooms: state.room_ids().collect(),
        available,
        day: sched.day,
        shift: sched.shift,
        service: sched.service,
        service_selector,
        assign_visible: sched.pending_assignment().is_some(),
        table,
    }
}
