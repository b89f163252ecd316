//! Message types for the wizard
//!
//! Every user action is one message. Messages are serializable so a whole
//! session can be replayed from a JSON script.

use serde::{Deserialize, Serialize};

use crate::catalog::{Day, RoomId, Service, Shift};

use super::types::CountAnswer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    // === Step 1: Facility Selection ===
    /// Region chosen or cleared
    RegionSelected {
        #[serde(default)]
        region: Option<String>,
    },
    /// Facility (CLUES) chosen or cleared
    FacilitySelected {
        #[serde(default)]
        facility: Option<String>,
    },

    // === Step 2: Room Count ===
    /// Answer to "does the count match reality?"
    CountAnswered { answer: CountAnswer },
    /// Corrected room count typed in
    OverrideEntered {
        #[serde(default)]
        value: Option<u32>,
    },
    /// Save and continue
    ConfirmRoomCount,

    // === Step 3: Services ===
    /// Replace the service set of a room
    RoomServicesChanged { room: RoomId, services: Vec<Service> },
    /// Toggle one service of a room
    ToggleRoomService { room: RoomId, service: Service },
    /// Save and continue
    SaveServices,

    // === Step 4: Schedule ===
    ScheduleRoomSelected { room: RoomId },
    DaySelected {
        #[serde(default)]
        day: Option<Day>,
    },
    ShiftSelected {
        #[serde(default)]
        shift: Option<Shift>,
    },
    ServiceSelected {
        #[serde(default)]
        service: Option<Service>,
    },
    /// Write the selected service into the selected slot
    AssignService,
    /// Save everything
    SaveAll,
    /// Export schedules to a spreadsheet
    Export,

    // === General ===
    DismissNotification,
    /// Start a new session
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay_script() {
        let json = r#"[
            {"type": "region_selected", "region": "Aguascalientes"},
            {"type": "facility_selected", "facility": "01ABC123"},
            {"type": "count_answered", "answer": "si"},
            {"type": "confirm_room_count"},
            {"type": "room_services_changed", "room": 1, "services": ["medicina_general"]},
            {"type": "day_selected", "day": "lunes"},
            {"type": "shift_selected"},
            {"type": "export"}
        ]"#;
        let msgs: Vec<Msg> = serde_json::from_str(json).unwrap();

        assert_eq!(msgs.len(), 8);
        assert_eq!(
            msgs[2],
            Msg::CountAnswered {
                answer: CountAnswer::Matches
            }
        );
        assert_eq!(
            msgs[4],
            Msg::RoomServicesChanged {
                room: RoomId::FIRST,
                services: vec![Service::MedicinaGeneral]
            }
        );
        assert_eq!(msgs[6], Msg::ShiftSelected { shift: None });
    }

    #[test]
    fn test_room_zero_is_rejected() {
        let json = r#"{"type": "schedule_room_selected", "room": 0}"#;
        assert!(serde_json::from_str::<Msg>(json).is_err());
    }
}
