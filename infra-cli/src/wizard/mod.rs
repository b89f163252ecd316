//! Infrastructure Registration Wizard
//!
//! Guided flow for recording the consultation rooms of a health facility:
//!
//! 1. Facility Selection - Region, then facility (CLUES)
//! 2. Room Count - Confirm or correct the room count reported by the system
//! 3. Services - Services available in each consultation room
//! 4. Schedule - Assign services to a day/shift grid per room, then export
//!
//! The wizard is a reducer: every user action is a [`Msg`], [`WizardApp::update`]
//! applies it to [`State`] and may return a [`Command`] for the runtime to
//! execute. [`WizardView::build`] projects the state into everything the
//! surface needs to render.

pub mod app;
pub mod command;
pub mod logic;
pub mod msg;
pub mod state;
pub mod types;
pub mod view;

pub use app::WizardApp;
pub use command::Command;
pub use msg::Msg;
pub use state::State;
pub use types::*;
pub use view::WizardView;
