//! Advisory Catalog
//!
//! Recommended field actions for each detected condition at each severity.

mod catalog;

pub use catalog::{resolve_advisory, AdvisoryEntry, UNKNOWN_ADVISORY};
