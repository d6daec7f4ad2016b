//! Domain models for the patient record service.

mod patient;

pub use patient::*;
