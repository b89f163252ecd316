//! Core enums for the wizard flow

use serde::{Deserialize, Serialize};

/// Furthest section of the wizard the user has unlocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub enum WizardStep {
    #[default]
    FacilitySelect,
    RoomCount,
    Services,
    Schedule,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::FacilitySelect => 1,
            Self::RoomCount => 2,
            Self::Services => 3,
            Self::Schedule => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FacilitySelect => "Seleccionar unidad",
            Self::RoomCount => "Consultorios",
            Self::Services => "Servicios por Consultorio",
            Self::Schedule => "Horarios por Consultorio",
        }
    }
}

/// Answer to "does the system room count match reality?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountAnswer {
    #[default]
    Unset,
    #[serde(alias = "si", alias = "sí")]
    Matches,
    #[serde(alias = "no")]
    Mismatch,
}

impl CountAnswer {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Matches => "Sí",
            Self::Mismatch => "No",
        }
    }
}

/// Banner shown after a save action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notification {
    RoomCountSaved,
    ServicesSaved,
    AllSaved,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Self::RoomCountSaved => "Información de consultorios guardada correctamente",
            Self::ServicesSaved => "Servicios guardados correctamente",
            Self::AllSaved => "Información completa guardada correctamente",
        }
    }
}
