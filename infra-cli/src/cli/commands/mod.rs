//! Subcommand handlers

pub mod listing;
pub mod replay;
pub mod session;
pub mod wizard;

pub use listing::{handle_facilities, handle_facility, handle_regions};
pub use replay::handle_replay;
pub use session::Session;
pub use wizard::handle_wizard;
