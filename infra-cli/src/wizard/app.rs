//! Wizard reducer
//!
//! `update` applies one message to the state. Actions whose prerequisites
//! are not met (a hidden button, a selector that is not offered yet) leave
//! the state untouched and return `Command::None`.

use crate::catalog::{RoomId, Service};
use crate::reference::ReferenceData;

use super::command::Command;
use super::logic::export::{ExportRequest, build_export_rows};
use super::msg::Msg;
use super::state::State;
use super::types::Notification;

pub struct WizardApp;

impl WizardApp {
    pub fn init(rooms: u8) -> State {
        State::new(rooms)
    }

    pub fn update(state: &mut State, data: &ReferenceData, msg: Msg) -> Command {
        log::trace!("wizard update: {:?}", msg);

        match msg {
            // === Step 1: Facility Selection ===
            Msg::RegionSelected { region } => handle_region_selected(state, data, region),
            Msg::FacilitySelected { facility } => handle_facility_selected(state, data, facility),

            // === Step 2: Room Count ===
            Msg::CountAnswered { answer } => {
                state.room_count.answer = answer;
                Command::None
            }
            Msg::OverrideEntered { value } => {
                state.room_count.override_value = value;
                Command::None
            }
            Msg::ConfirmRoomCount => handle_confirm_room_count(state, data),

            // === Step 3: Services ===
            Msg::RoomServicesChanged { room, services } => {
                if !services_unlocked(state, "change services") {
                    return Command::None;
                }
                let Some(room_state) = state.room_mut(room) else {
                    log::warn!("Ignoring services for unknown room {}", room.number());
                    return Command::None;
                };
                room_state.services = services.into_iter().collect();
                drop_unavailable_service(state, room);
                Command::None
            }
            Msg::ToggleRoomService { room, service } => {
                if !services_unlocked(state, "toggle a service") {
                    return Command::None;
                }
                let Some(room_state) = state.room_mut(room) else {
                    log::warn!("Ignoring services for unknown room {}", room.number());
                    return Command::None;
                };
                if !room_state.services.remove(&service) {
                    room_state.services.insert(service);
                }
                drop_unavailable_service(state, room);
                Command::None
            }
            Msg::SaveServices => handle_save_services(state),

            // === Step 4: Schedule ===
            Msg::ScheduleRoomSelected { room } => {
                if !schedule_unlocked(state, "select a room") {
                    return Command::None;
                }
                if state.room(room).is_none() {
                    log::warn!("Ignoring unknown room {}", room.number());
                    return Command::None;
                }
                state.schedule.active_room = room;
                state.schedule.service = None;
                Command::None
            }
            Msg::DaySelected { day } => {
                if schedule_unlocked(state, "select a day") {
                    state.schedule.day = day;
                    state.schedule.service = None;
                }
                Command::None
            }
            Msg::ShiftSelected { shift } => {
                if schedule_unlocked(state, "select a shift") {
                    state.schedule.shift = shift;
                    state.schedule.service = None;
                }
                Command::None
            }
            Msg::ServiceSelected { service } => handle_service_selected(state, service),
            Msg::AssignService => handle_assign(state),
            Msg::SaveAll => {
                if !schedule_unlocked(state, "save") {
                    return Command::None;
                }
                notify(state, Notification::AllSaved)
            }
            Msg::Export => handle_export(state),

            // === General ===
            Msg::DismissNotification => {
                state.notification = None;
                Command::None
            }
            Msg::Reset => {
                log::info!("Starting a new session");
                *state = State::new(state.rooms.len() as u8);
                Command::None
            }
        }
    }
}

fn handle_region_selected(
    state: &mut State,
    data: &ReferenceData,
    region: Option<String>,
) -> Command {
    if state.selection.region == region {
        return Command::None;
    }

    if let Some(name) = &region {
        if !data.has_region(name) {
            log::debug!("Region '{}' has no facilities", name);
        }
    }

    // A facility from the previous region must not survive the change
    if let Some(previous) = state.selection.facility_id.take() {
        log::info!("Region changed, facility '{}' deselected", previous);
    }
    state.selection.region = region;
    Command::None
}

fn handle_facility_selected(
    state: &mut State,
    data: &ReferenceData,
    facility: Option<String>,
) -> Command {
    let Some(region) = state.selection.region.as_deref() else {
        log::debug!("Facility selector is disabled until a region is chosen");
        return Command::None;
    };

    match facility {
        None => state.selection.facility_id = None,
        Some(id) => {
            if data.facilities_in_region(region).iter().any(|o| o.id == id) {
                log::info!("Facility '{}' selected in '{}'", id, region);
                state.selection.facility_id = Some(id);
            } else {
                log::warn!("Facility '{}' is not listed under '{}'", id, region);
            }
        }
    }
    Command::None
}

fn handle_confirm_room_count(state: &mut State, data: &ReferenceData) -> Command {
    let Some(facility_id) = state.selection.facility_id.as_deref() else {
        log::debug!("Room count continue pressed without a facility");
        return Command::None;
    };
    if !state.room_count.can_continue() {
        log::debug!("Room count continue pressed before the answer was complete");
        return Command::None;
    }

    let system_total = data
        .facility_detail(facility_id)
        .map(|f| f.consultation_total());
    log::info!(
        "Room count for '{}' confirmed: system {:?}, confirmed {:?}",
        facility_id,
        system_total,
        state.room_count.confirmed_count(system_total)
    );

    state.room_count.saved = true;
    notify(state, Notification::RoomCountSaved)
}

fn handle_save_services(state: &mut State) -> Command {
    if !services_unlocked(state, "save services") {
        return Command::None;
    }

    // Empty selections still unlock the schedule
    if state.rooms.iter().all(|r| r.services.is_empty()) {
        log::warn!("Schedule section unlocked with no services selected in any room");
    }

    state.services.saved = true;
    notify(state, Notification::ServicesSaved)
}

fn handle_service_selected(state: &mut State, service: Option<Service>) -> Command {
    if !schedule_unlocked(state, "select a service") {
        return Command::None;
    }

    let Some(service) = service else {
        state.schedule.service = None;
        return Command::None;
    };

    if state.schedule.day.is_none() || state.schedule.shift.is_none() {
        log::debug!("Service selector is hidden until day and shift are chosen");
        return Command::None;
    }

    let available = state
        .active_room_services()
        .is_some_and(|services| services.contains(&service));
    if !available {
        log::debug!(
            "{} is not offered in {}",
            service.label(),
            state.schedule.active_room
        );
        return Command::None;
    }

    state.schedule.service = Some(service);
    Command::None
}

fn handle_assign(state: &mut State) -> Command {
    if !schedule_unlocked(state, "assign") {
        return Command::None;
    }
    let Some((slot, service)) = state.schedule.pending_assignment() else {
        log::debug!("Assign pressed before day, shift and service were chosen");
        return Command::None;
    };

    let room = state.schedule.active_room;
    let Some(room_state) = state.room_mut(room) else {
        return Command::None;
    };

    match room_state.schedule.assign(slot, service) {
        Some(previous) if previous != service => log::info!(
            "{} {}: {} replaced by {}",
            room,
            slot.key(),
            previous.label(),
            service.label()
        ),
        _ => log::info!("{} {}: {}", room, slot.key(), service.label()),
    }

    // Force a fresh pick for the next assignment
    state.schedule.clear_selection();
    Command::None
}

fn handle_export(state: &mut State) -> Command {
    if !schedule_unlocked(state, "export") {
        return Command::None;
    }

    let rows = build_export_rows(state.rooms.iter().map(|r| (r.id, &r.schedule)));
    if rows.is_empty() {
        log::warn!("Export skipped: no schedule slots are assigned");
        return Command::None;
    }

    Command::Export(ExportRequest { rows })
}

fn notify(state: &mut State, notification: Notification) -> Command {
    state.notification = Some(notification);
    Command::Notify(notification)
}

/// Clear the chosen schedule service if `room` is active and no longer offers it
fn drop_unavailable_service(state: &mut State, room: RoomId) {
    if state.schedule.active_room != room {
        return;
    }
    if let Some(service) = state.schedule.service {
        let still_available = state
            .room(room)
            .is_some_and(|r| r.services.contains(&service));
        if !still_available {
            state.schedule.service = None;
        }
    }
}

fn services_unlocked(state: &State, action: &str) -> bool {
    if !state.room_count.saved {
        log::debug!("Cannot {} before the room count is confirmed", action);
    }
    state.room_count.saved
}

fn schedule_unlocked(state: &State, action: &str) -> bool {
    if !state.services.saved {
        log::debug!("Cannot {} before the services are saved", action);
    }
    state.services.saved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Day, Shift};
    use crate::wizard::logic::schedule::Slot;
    use crate::wizard::types::{CountAnswer, WizardStep};

    fn data() -> ReferenceData {
        ReferenceData::fixture("test")
    }

    fn dispatch(state: &mut State, data: &ReferenceData, msgs: Vec<Msg>) -> Vec<Command> {
        msgs.into_iter()
            .map(|msg| WizardApp::update(state, data, msg))
            .collect()
    }

    fn region(name: &str) -> Msg {
        Msg::RegionSelected {
            region: Some(name.to_string()),
        }
    }

    fn facility(id: &str) -> Msg {
        Msg::FacilitySelected {
            facility: Some(id.to_string()),
        }
    }

    /// State with the schedule section unlocked and medicina general in room 1
    fn schedule_ready(data: &ReferenceData) -> State {
        let mut state = WizardApp::init(2);
        dispatch(
            &mut state,
            data,
            vec![
                region("Aguascalientes"),
                facility("01ABC123"),
                Msg::CountAnswered {
                    answer: CountAnswer::Matches,
                },
                Msg::ConfirmRoomCount,
                Msg::RoomServicesChanged {
                    room: RoomId::FIRST,
                    services: vec![Service::MedicinaGeneral, Service::Pediatria],
                },
                Msg::SaveServices,
            ],
        );
        state
    }

    fn assign(state: &mut State, data: &ReferenceData, day: Day, shift: Shift, service: Service) {
        dispatch(
            state,
            data,
            vec![
                Msg::DaySelected { day: Some(day) },
                Msg::ShiftSelected { shift: Some(shift) },
                Msg::ServiceSelected {
                    service: Some(service),
                },
                Msg::AssignService,
            ],
        );
    }

    #[test]
    fn test_facility_requires_region() {
        let data = data();
        let mut state = WizardApp::init(2);
        WizardApp::update(&mut state, &data, facility("01ABC123"));
        assert_eq!(state.selection.facility_id, None);
    }

    #[test]
    fn test_facility_from_other_region_is_ignored() {
        let data = data();
        let mut state = WizardApp::init(2);
        dispatch(&mut state, &data, vec![region("Aguascalientes"), facility("02DEF456")]);
        assert_eq!(state.selection.facility_id, None);
    }

    #[test]
    fn test_region_change_resets_facility() {
        let data = data();
        let mut state = WizardApp::init(2);
        dispatch(&mut state, &data, vec![region("Aguascalientes"), facility("01ABC123")]);
        assert_eq!(state.selection.facility_id.as_deref(), Some("01ABC123"));

        // Same region again keeps the facility
        WizardApp::update(&mut state, &data, region("Aguascalientes"));
        assert_eq!(state.selection.facility_id.as_deref(), Some("01ABC123"));

        WizardApp::update(&mut state, &data, region("Baja California"));
        assert_eq!(state.selection.facility_id, None);

        dispatch(
            &mut state,
            &data,
            vec![facility("02DEF456"), Msg::RegionSelected { region: None }],
        );
        assert_eq!(state.selection.facility_id, None);
        assert_eq!(state.selection.region, None);
    }

    #[test]
    fn test_confirm_without_answer_is_noop() {
        let data = data();
        let mut state = WizardApp::init(2);
        dispatch(&mut state, &data, vec![region("Aguascalientes"), facility("01ABC123")]);

        let cmd = WizardApp::update(&mut state, &data, Msg::ConfirmRoomCount);
        assert!(cmd.is_none());
        assert!(!state.room_count.saved);
        assert_eq!(state.notification, None);
    }

    #[test]
    fn test_mismatch_requires_override_value() {
        let data = data();
        let mut state = WizardApp::init(2);
        dispatch(
            &mut state,
            &data,
            vec![
                region("Aguascalientes"),
                facility("01ABC123"),
                Msg::CountAnswered {
                    answer: CountAnswer::Mismatch,
                },
                Msg::ConfirmRoomCount,
            ],
        );
        assert!(!state.room_count.saved);

        dispatch(
            &mut state,
            &data,
            vec![Msg::OverrideEntered { value: Some(22) }, Msg::ConfirmRoomCount],
        );
        assert!(state.room_count.saved);
        assert_eq!(state.notification, Some(Notification::RoomCountSaved));
        assert_eq!(state.step(), WizardStep::Services);
    }

    #[test]
    fn test_confirm_requires_facility() {
        let data = data();
        let mut state = WizardApp::init(2);
        dispatch(
            &mut state,
            &data,
            vec![
                Msg::CountAnswered {
                    answer: CountAnswer::Matches,
                },
                Msg::ConfirmRoomCount,
            ],
        );
        assert!(!state.room_count.saved);
    }

    #[test]
    fn test_services_locked_until_room_count_saved() {
        let data = data();
        let mut state = WizardApp::init(2);
        dispatch(
            &mut state,
            &data,
            vec![
                Msg::RoomServicesChanged {
                    room: RoomId::FIRST,
                    services: vec![Service::Pediatria],
                },
                Msg::SaveServices,
            ],
        );
        assert!(state.rooms[0].services.is_empty());
        assert!(!state.services.saved);
    }

    #[test]
    fn test_save_services_with_empty_selection_unlocks_schedule() {
        let data = data();
        let mut state = WizardApp::init(2);
        let cmds = dispatch(
            &mut state,
            &data,
            vec![
                region("Aguascalientes"),
                facility("01ABC123"),
                Msg::CountAnswered {
                    answer: CountAnswer::Matches,
                },
                Msg::ConfirmRoomCount,
                Msg::SaveServices,
            ],
        );
        assert!(state.services.saved);
        assert_eq!(
            cmds.last(),
            Some(&Command::Notify(Notification::ServicesSaved))
        );
    }

    #[test]
    fn test_same_service_allowed_in_both_rooms() {
        let data = data();
        let mut state = schedule_ready(&data);
        let second = RoomId::new(2).unwrap();
        WizardApp::update(
            &mut state,
            &data,
            Msg::ToggleRoomService {
                room: second,
                service: Service::MedicinaGeneral,
            },
        );
        assert!(state.rooms[0].services.contains(&Service::MedicinaGeneral));
        assert!(state.rooms[1].services.contains(&Service::MedicinaGeneral));

        WizardApp::update(
            &mut state,
            &data,
            Msg::ToggleRoomService {
                room: second,
                service: Service::MedicinaGeneral,
            },
        );
        assert!(state.rooms[1].services.is_empty());
    }

    #[test]
    fn test_assign_then_reassign_overwrites() {
        let data = data();
        let mut state = schedule_ready(&data);
        assign(&mut state, &data, Day::Lunes, Shift::Matutino, Service::MedicinaGeneral);
        assign(&mut state, &data, Day::Lunes, Shift::Matutino, Service::Pediatria);

        let grid = &state.rooms[0].schedule;
        assert_eq!(grid.len(), 1);
        assert_eq!(
            grid.get(Slot::new(Day::Lunes, Shift::Matutino)),
            Some(Service::Pediatria)
        );
    }

    #[test]
    fn test_assign_clears_selectors() {
        let data = data();
        let mut state = schedule_ready(&data);
        assign(&mut state, &data, Day::Martes, Shift::Vespertino, Service::Pediatria);
        assert_eq!(state.schedule.day, None);
        assert_eq!(state.schedule.shift, None);
        assert_eq!(state.schedule.service, None);

        // Pressing assign again without new picks does nothing
        WizardApp::update(&mut state, &data, Msg::AssignService);
        assert_eq!(state.rooms[0].schedule.len(), 1);
    }

    #[test]
    fn test_service_must_be_offered_by_active_room() {
        let data = data();
        let mut state = schedule_ready(&data);
        dispatch(
            &mut state,
            &data,
            vec![
                Msg::DaySelected {
                    day: Some(Day::Jueves),
                },
                Msg::ShiftSelected {
                    shift: Some(Shift::Nocturno),
                },
                Msg::ServiceSelected {
                    service: Some(Service::Odontologia),
                },
            ],
        );
        assert_eq!(state.schedule.service, None);
    }

    #[test]
    fn test_service_requires_day_and_shift() {
        let data = data();
        let mut state = schedule_ready(&data);
        WizardApp::update(
            &mut state,
            &data,
            Msg::ServiceSelected {
                service: Some(Service::Pediatria),
            },
        );
        assert_eq!(state.schedule.service, None);
    }

    #[test]
    fn test_changing_room_clears_service() {
        let data = data();
        let mut state = schedule_ready(&data);
        dispatch(
            &mut state,
            &data,
            vec![
                Msg::DaySelected {
                    day: Some(Day::Lunes),
                },
                Msg::ShiftSelected {
                    shift: Some(Shift::Matutino),
                },
                Msg::ServiceSelected {
                    service: Some(Service::Pediatria),
                },
                Msg::ScheduleRoomSelected {
                    room: RoomId::new(2).unwrap(),
                },
            ],
        );
        assert_eq!(state.schedule.service, None);
        assert_eq!(state.schedule.day, Some(Day::Lunes));

        // Room 2 has nothing to offer, so assign stays inert
        WizardApp::update(&mut state, &data, Msg::AssignService);
        assert!(state.rooms[1].schedule.is_empty());
    }

    #[test]
    fn test_removing_active_service_clears_pick() {
        let data = data();
        let mut state = schedule_ready(&data);
        dispatch(
            &mut state,
            &data,
            vec![
                Msg::DaySelected {
                    day: Some(Day::Lunes),
                },
                Msg::ShiftSelected {
                    shift: Some(Shift::Matutino),
                },
                Msg::ServiceSelected {
                    service: Some(Service::Pediatria),
                },
                Msg::ToggleRoomService {
                    room: RoomId::FIRST,
                    service: Service::Pediatria,
                },
            ],
        );
        assert_eq!(state.schedule.service, None);
    }

    #[test]
    fn test_facility_change_keeps_services_and_schedule() {
        let data = data();
        let mut state = schedule_ready(&data);
        assign(&mut state, &data, Day::Lunes, Shift::Matutino, Service::MedicinaGeneral);
        dispatch(&mut state, &data, vec![region("Baja California"), facility("02DEF456")]);

        assert_eq!(state.rooms[0].services.len(), 2);
        assert_eq!(state.rooms[0].schedule.len(), 1);
        assert!(state.services.saved);
    }

    #[test]
    fn test_export_with_no_assignments_is_aborted() {
        let data = data();
        let mut state = schedule_ready(&data);
        assert!(WizardApp::update(&mut state, &data, Msg::Export).is_none());
    }

    #[test]
    fn test_export_row_count_matches_assigned_cells() {
        let data = data();
        let mut state = schedule_ready(&data);
        assign(&mut state, &data, Day::Lunes, Shift::Matutino, Service::MedicinaGeneral);
        assign(&mut state, &data, Day::Lunes, Shift::Matutino, Service::MedicinaGeneral);
        assign(&mut state, &data, Day::Domingo, Shift::Nocturno, Service::Pediatria);

        let second = RoomId::new(2).unwrap();
        dispatch(
            &mut state,
            &data,
            vec![
                Msg::ToggleRoomService {
                    room: second,
                    service: Service::Oftalmologia,
                },
                Msg::ScheduleRoomSelected { room: second },
            ],
        );
        assign(&mut state, &data, Day::Viernes, Shift::Vespertino, Service::Oftalmologia);

        let assigned: usize = state.rooms.iter().map(|r| r.schedule.len()).sum();
        match WizardApp::update(&mut state, &data, Msg::Export) {
            Command::Export(request) => {
                assert_eq!(request.rows.len(), assigned);
                assert_eq!(request.rows.len(), 3);
                assert_eq!(request.rows[2].room, "Consultorio 2");
            }
            other => panic!("expected export, got {:?}", other),
        }
    }

    #[test]
    fn test_save_all_and_dismiss() {
        let data = data();
        let mut state = schedule_ready(&data);
        let cmd = WizardApp::update(&mut state, &data, Msg::SaveAll);
        assert_eq!(cmd, Command::Notify(Notification::AllSaved));
        WizardApp::update(&mut state, &data, Msg::DismissNotification);
        assert_eq!(state.notification, None);
    }

    #[test]
    fn test_reset_starts_over() {
        let data = data();
        let mut state = schedule_ready(&data);
        WizardApp::update(&mut state, &data, Msg::Reset);
        assert_eq!(state, State::new(2));
    }

    #[test]
    fn test_end_to_end_fixture_session() {
        let data = data();
        let mut state = WizardApp::init(2);
        let cmds = dispatch(
            &mut state,
            &data,
            vec![
                region("Aguascalientes"),
                facility("01ABC123"),
                Msg::CountAnswered {
                    answer: CountAnswer::Matches,
                },
                Msg::ConfirmRoomCount,
                Msg::RoomServicesChanged {
                    room: RoomId::FIRST,
                    services: vec![Service::MedicinaGeneral],
                },
                Msg::SaveServices,
                Msg::DaySelected {
                    day: Some(Day::Lunes),
                },
                Msg::ShiftSelected {
                    shift: Some(Shift::Matutino),
                },
                Msg::ServiceSelected {
                    service: Some(Service::MedicinaGeneral),
                },
                Msg::AssignService,
                Msg::Export,
            ],
        );

        match cmds.last() {
            Some(Command::Export(request)) => {
                assert_eq!(request.rows.len(), 1);
                let row = &request.rows[0];
                assert_eq!(
                    (
                        row.room.as_str(),
                        row.day.as_str(),
                        row.shift.as_str(),
                        row.service.as_str()
                    ),
                    ("Consultorio 1", "Lunes", "Matutino", "Medicina General")
                );
            }
            other => panic!("expected export, got {:?}", other),
        }
    }
}
