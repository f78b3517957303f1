//! Disease Severity Classification
//!
//! Grades how severe a detected leaf condition is likely to become under the
//! current field environment. Each label carries its own comfort bands.

mod classifier;
mod label;
mod level;

pub use classifier::classify_severity;
pub use label::DiseaseLabel;
pub use level::Severity;
