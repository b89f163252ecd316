//! Weekly schedule grid of a consultation room
//!
//! A room has one slot per (day, shift) pair, 21 in total. A slot is either
//! empty or holds exactly one service. Assigning to an occupied slot replaces
//! the previous service; there is no removal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Day, RoomId, Service, Shift};

/// (day, shift) key of the schedule grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub day: Day,
    pub shift: Shift,
}

impl Slot {
    pub fn new(day: Day, shift: Shift) -> Self {
        Self { day, shift }
    }

    /// `"{day}_{shift}"`, e.g. `lunes_matutino`
    pub fn key(&self) -> String {
        format!("{}_{}", self.day.key(), self.shift.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleGrid {
    slots: BTreeMap<Slot, Service>,
}

impl ScheduleGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `service` in `slot`, returning the service it replaced
    pub fn assign(&mut self, slot: Slot, service: Service) -> Option<Service> {
        self.slots.insert(slot, service)
    }

    pub fn get(&self, slot: Slot) -> Option<Service> {
        self.slots.get(&slot).copied()
    }

    /// Assigned slots ordered by day, then shift
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Service)> + '_ {
        self.slots.iter().map(|(slot, service)| (*slot, *service))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Table with one row per shift and one column per day
    pub fn table(&self, room: RoomId) -> ScheduleTable {
        let rows = Shift::ALL
            .iter()
            .map(|&shift| ScheduleTableRow {
                shift,
                cells: Day::ALL
                    .iter()
                    .map(|&day| self.get(Slot::new(day, shift)))
                    .collect(),
            })
            .collect();

        ScheduleTable { room, rows }
    }
}

/// Rendered schedule of one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTable {
    pub room: RoomId,
    pub rows: Vec<ScheduleTableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTableRow {
    pub shift: Shift,
    /// One cell per day, Monday first
    pub cells: Vec<Option<Service>>,
}

impl ScheduleTable {
    pub const SHIFT_COLUMN: &'static str = "Turno";

    pub fn title(&self) -> String {
        self.room.label()
    }

    /// `Turno` followed by the seven day labels
    pub fn header(&self) -> Vec<&'static str> {
        std::iter::once(Self::SHIFT_COLUMN)
            .chain(Day::ALL.iter().map(|d| d.label()))
            .collect()
    }

    /// Cell texts per row, shift label first and blanks for empty slots
    pub fn text_rows(&self) -> Vec<Vec<&'static str>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.shift.label())
                    .chain(row.cells.iter().map(|c| c.map(|s| s.label()).unwrap_or("")))
                    .collect()
            })
            .collect()
    }
}
