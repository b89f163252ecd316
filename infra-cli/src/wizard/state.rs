//! State types for the wizard
//!
//! One [`State`] value holds everything a single session has entered.
//! Derived values (options, totals, visibility) are not stored here; they
//! are computed by the view from this state plus the reference data.

use std::collections::BTreeSet;

use crate::catalog::{Day, RoomId, Service, Shift};

use super::logic::schedule::{ScheduleGrid, Slot};
use super::types::{CountAnswer, Notification, WizardStep};

/// Rooms per facility when nothing else is configured
pub const DEFAULT_ROOMS: u8 = 2;

/// Main application state for the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Step 1: region and facility selection
    pub selection: SelectionState,

    /// Step 2: room count confirmation
    pub room_count: RoomCountState,

    /// Step 3: whether the services were saved
    pub services: ServicesState,

    /// Step 4: current day/shift/service picks
    pub schedule: ScheduleState,

    /// Per-room services and schedule, indexed by `RoomId::index`
    pub rooms: Vec<RoomState>,

    /// Banner from the last save action
    pub notification: Option<Notification>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(DEFAULT_ROOMS)
    }
}

impl State {
    /// Fresh session with `room_count` rooms (at least one)
    pub fn new(room_count: u8) -> Self {
        Self {
            selection: SelectionState::default(),
            room_count: RoomCountState::default(),
            services: ServicesState::default(),
            schedule: ScheduleState::default(),
            rooms: RoomId::range(room_count.max(1)).map(RoomState::new).collect(),
            notification: None,
        }
    }

    pub fn room(&self, id: RoomId) -> Option<&RoomState> {
        self.rooms.get(id.index())
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut RoomState> {
        self.rooms.get_mut(id.index())
    }

    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().map(|r| r.id)
    }

    /// Services of the room currently selected in the schedule section
    pub fn active_room_services(&self) -> Option<&BTreeSet<Service>> {
        self.room(self.schedule.active_room).map(|r| &r.services)
    }

    /// Furthest unlocked section
    pub fn step(&self) -> WizardStep {
        if self.services.saved {
            WizardStep::Schedule
        } else if self.room_count.saved {
            WizardStep::Services
        } else if self.selection.facility_id.is_some() {
            WizardStep::RoomCount
        } else {
            WizardStep::FacilitySelect
        }
    }
}

/// State for Step 1: Facility Selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub region: Option<String>,
    pub facility_id: Option<String>,
}

/// State for Step 2: Room Count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomCountState {
    pub answer: CountAnswer,

    /// Corrected count, only meaningful when the answer is `Mismatch`
    pub override_value: Option<u32>,

    /// Set once the continue action opened the gate
    pub saved: bool,
}

impl RoomCountState {
    pub fn override_visible(&self) -> bool {
        self.answer == CountAnswer::Mismatch
    }

    /// Whether continue would open the gate
    pub fn can_continue(&self) -> bool {
        match self.answer {
            CountAnswer::Unset => false,
            CountAnswer::Matches => true,
            CountAnswer::Mismatch => self.override_value.is_some(),
        }
    }

    /// Count the user agreed to, given the system total
    pub fn confirmed_count(&self, system_total: Option<u32>) -> Option<u32> {
        match self.answer {
            CountAnswer::Unset => None,
            CountAnswer::Matches => system_total,
            CountAnswer::Mismatch => self.override_value,
        }
    }
}

/// State for Step 3: Services
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicesState {
    /// Set once continue was pressed; selections are not checked
    pub saved: bool,
}

/// State for Step 4: Schedule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleState {
    pub active_room: RoomId,
    pub day: Option<Day>,
    pub shift: Option<Shift>,
    pub service: Option<Service>,
}

impl ScheduleState {
    /// Slot and service when all three selectors are filled
    pub fn pending_assignment(&self) -> Option<(Slot, Service)> {
        Some((Slot::new(self.day?, self.shift?), self.service?))
    }

    pub fn clear_selection(&mut self) {
        self.day = None;
        self.shift = None;
        self.service = None;
    }
}

/// Services and schedule of one consultation room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomState {
    pub id: RoomId,
    pub services: BTreeSet<Service>,
    pub schedule: ScheduleGrid,
}

impl RoomState {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            services: BTreeSet::new(),
            schedule: ScheduleGrid::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_two_empty_rooms() {
        let state = State::default();
        assert_eq!(state.rooms.len(), 2);
        assert!(state.rooms.iter().all(|r| r.services.is_empty() && r.schedule.is_empty()));
        assert_eq!(state.schedule.active_room, RoomId::FIRST);
        assert_eq!(state.step(), WizardStep::FacilitySelect);
    }

    #[test]
    fn test_room_lookup_out_of_range() {
        let state = State::new(2);
        assert!(state.room(RoomId::new(3).unwrap()).is_none());
        assert_eq!(State::new(0).rooms.len(), 1);
    }

    #[test]
    fn test_count_gate() {
        let mut rc = RoomCountState::default();
        assert!(!rc.can_continue());
        assert!(!rc.override_visible());

        rc.answer = CountAnswer::Matches;
        assert!(rc.can_continue());
        assert!(!rc.override_visible());
        assert_eq!(rc.confirmed_count(Some(25)), Some(25));

        rc.answer = CountAnswer::Mismatch;
        assert!(rc.override_visible());
        assert!(!rc.can_continue());

        rc.override_value = Some(18);
        assert!(rc.can_continue());
        assert_eq!(rc.confirmed_count(Some(25)), Some(18));
    }

    #[test]
    fn test_pending_assignment_requires_all_selectors() {
        let mut schedule = ScheduleState {
            day: Some(Day::Lunes),
            shift: Some(Shift::Matutino),
            ..Default::default()
        };
        assert!(schedule.pending_assignment().is_none());

        schedule.service = Some(Service::Pediatria);
        let (slot, service) = schedule.pending_assignment().unwrap();
        assert_eq!(slot, Slot::new(Day::Lunes, Shift::Matutino));
        assert_eq!(service, Service::Pediatria);

        schedule.clear_selection();
        assert_eq!(schedule, ScheduleState::default());
    }
}
