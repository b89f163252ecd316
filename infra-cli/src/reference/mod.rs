//! Reference data: facility infrastructure joined with the facility → region table
//!
//! Loaded once at startup and read-only afterwards. When the source
//! spreadsheets cannot be read the store falls back to a small built-in
//! fixture so the wizard stays usable; the fallback is recorded in
//! [`DataSource`] and logged.

pub mod fixture;
pub mod loader;
pub mod models;
pub mod store;

pub use loader::load_reference_data;
pub use models::{Facility, FacilityOption};
pub use store::{DataSource, ReferenceData};
