//! Built-in facilities used when the source spreadsheets cannot be loaded

use super::models::{Facility, RoomCounts};

pub fn fixture_facilities() -> Vec<Facility> {
    vec![
        Facility {
            id: "01ABC123".to_string(),
            region: Some("Aguascalientes".to_string()),
            name: Some("Hospital General de Aguascalientes".to_string()),
            general_rooms: RoomCounts::new(12, 3, 15),
            specialty_rooms: RoomCounts::new(8, 2, 10),
            operating_rooms: RoomCounts::new(4, 1, 5),
        },
        Facility {
            id: "02DEF456".to_string(),
            region: Some("Baja California".to_string()),
            name: Some("Hospital General de Tijuana".to_string()),
            general_rooms: RoomCounts::new(15, 5, 20),
            specialty_rooms: RoomCounts::new(10, 2, 12),
            operating_rooms: RoomCounts::new(5, 1, 6),
        },
    ]
}
