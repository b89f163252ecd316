//! Static catalogs shared by the wizard
//!
//! Services offered per consultation room, the days of the week and the
//! daily shifts. All of them are closed sets with a stable lower-case key
//! and a Spanish display label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Medical specialty that can be offered in a consultation room
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    MedicinaGeneral,
    Pediatria,
    Ginecologia,
    CirugiaGeneral,
    Traumatologia,
    Oftalmologia,
    Otorrinolaringologia,
    Dermatologia,
    Psiquiatria,
    Odontologia,
}

impl Service {
    /// Every service, in catalog order
    pub const ALL: [Service; 10] = [
        Self::MedicinaGeneral,
        Self::Pediatria,
        Self::Ginecologia,
        Self::CirugiaGeneral,
        Self::Traumatologia,
        Self::Oftalmologia,
        Self::Otorrinolaringologia,
        Self::Dermatologia,
        Self::Psiquiatria,
        Self::Odontologia,
    ];

    /// Catalog id, the same key used by serde
    #[cfg(test)]
    pub fn id(&self) -> &'static str {
        match self {
            Self::MedicinaGeneral => "medicina_general",
            Self::Pediatria => "pediatria",
            Self::Ginecologia => "ginecologia",
            Self::CirugiaGeneral => "cirugia_general",
            Self::Traumatologia => "traumatologia",
            Self::Oftalmologia => "oftalmologia",
            Self::Otorrinolaringologia => "otorrinolaringologia",
            Self::Dermatologia => "dermatologia",
            Self::Psiquiatria => "psiquiatria",
            Self::Odontologia => "odontologia",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MedicinaGeneral => "Medicina General",
            Self::Pediatria => "Pediatría",
            Self::Ginecologia => "Ginecología",
            Self::CirugiaGeneral => "Cirugía General",
            Self::Traumatologia => "Traumatología",
            Self::Oftalmologia => "Oftalmología",
            Self::Otorrinolaringologia => "Otorrinolaringología",
            Self::Dermatologia => "Dermatología",
            Self::Psiquiatria => "Psiquiatría",
            Self::Odontologia => "Odontología",
        }
    }

    /// Look up a service by its catalog id
    #[cfg(test)]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.id() == id)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    Lunes,
    Martes,
    #[serde(rename = "miércoles", alias = "miercoles")]
    Miercoles,
    Jueves,
    Viernes,
    #[serde(rename = "sábado", alias = "sabado")]
    Sabado,
    Domingo,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Self::Lunes,
        Self::Martes,
        Self::Miercoles,
        Self::Jueves,
        Self::Viernes,
        Self::Sabado,
        Self::Domingo,
    ];

    /// Lower-case key, as used in slot keys
    pub fn key(&self) -> &'static str {
        match self {
            Self::Lunes => "lunes",
            Self::Martes => "martes",
            Self::Miercoles => "miércoles",
            Self::Jueves => "jueves",
            Self::Viernes => "viernes",
            Self::Sabado => "sábado",
            Self::Domingo => "domingo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lunes => "Lunes",
            Self::Martes => "Martes",
            Self::Miercoles => "Miércoles",
            Self::Jueves => "Jueves",
            Self::Viernes => "Viernes",
            Self::Sabado => "Sábado",
            Self::Domingo => "Domingo",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Matutino,
    Vespertino,
    Nocturno,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Self::Matutino, Self::Vespertino, Self::Nocturno];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Matutino => "matutino",
            Self::Vespertino => "vespertino",
            Self::Nocturno => "nocturno",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Matutino => "Matutino",
            Self::Vespertino => "Vespertino",
            Self::Nocturno => "Nocturno",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 1-based consultation room index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RoomId(u8);

impl TryFrom<u8> for RoomId {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| "room numbers start at 1".to_string())
    }
}

impl From<RoomId> for u8 {
    fn from(room: RoomId) -> u8 {
        room.0
    }
}

impl RoomId {
    pub const FIRST: RoomId = RoomId(1);

    /// Build a room id, rejecting 0
    pub fn new(number: u8) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Position of this room in a zero-based list
    pub fn index(&self) -> usize {
        usize::from(self.0) - 1
    }

    pub fn label(&self) -> String {
        format!("Consultorio {}", self.0)
    }

    pub fn key(&self) -> String {
        format!("consultorio-{}", self.0)
    }

    /// All room ids from 1 up to `count`
    pub fn range(count: u8) -> impl Iterator<Item = RoomId> {
        (1..=count).map(RoomId)
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Consultorio {}", self.0)
    }
}
