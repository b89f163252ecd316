//! Business logic for the wizard
//!
//! Pure functions and data structures with no UI dependencies.

pub mod export;
pub mod schedule;

pub use export::save_export;
