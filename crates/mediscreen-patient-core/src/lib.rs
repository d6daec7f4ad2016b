//! Mediscreen Patient Core Library
//!
//! Patient demographic record management: storage, lookup, and the
//! create/update/delete lifecycle.
//!
//! # Architecture
//!
//! ```text
//!   REST adapter / FFI host
//!            │
//!            ▼
//!     PatientService ──── validate (create only)
//!            │
//!            ▼
//!      PatientStore
//!       ┌────┴─────┐
//!       ▼          ▼
//!   Database   MemoryStore
//!   (SQLite)     (arena)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, PatientCandidate)
//! - [`validation`]: Field checks applied on create
//! - [`store`]: Record store contract and the in-memory arena
//! - [`db`]: SQLite-backed record store
//! - [`service`]: Not-found and validation semantics over a store
//! - [`config`]: Startup configuration

pub mod config;
pub mod db;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, ServiceConfig, StoreBackend};
pub use db::Database;
pub use models::{Patient, PatientCandidate, PatientId};
pub use service::{PatientError, PatientKey, PatientResult, PatientService};
pub use store::{DynStore, MemoryStore, PatientStore, StoreError};
pub use validation::{validate, ValidationError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MediscreenError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<PatientError> for MediscreenError {
    fn from(e: PatientError) -> Self {
        match e {
            PatientError::NotFound(_) => MediscreenError::NotFound(e.to_string()),
            PatientError::InvalidInput(reason) => MediscreenError::InvalidInput(reason.to_string()),
            PatientError::Store(_) | PatientError::LockPoisoned(_) => {
                MediscreenError::DatabaseError(e.to_string())
            }
        }
    }
}

impl From<StoreError> for MediscreenError {
    fn from(e: StoreError) -> Self {
        MediscreenError::DatabaseError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<MediscreenCore>, MediscreenError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(MediscreenCore {
        service: PatientService::new(db),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<MediscreenCore>, MediscreenError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(MediscreenCore {
        service: PatientService::new(db),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe patient service for FFI.
#[derive(uniffi::Object)]
pub struct MediscreenCore {
    service: PatientService<Database>,
}

#[uniffi::export]
impl MediscreenCore {
    /// Get a patient by id.
    pub fn find_patient_by_id(&self, id: i64) -> Result<FfiPatient, MediscreenError> {
        Ok(self.service.find_by_id(id)?.into())
    }

    /// Get a patient by exact family name.
    pub fn find_patient_by_family_name(
        &self,
        family_name: String,
    ) -> Result<FfiPatient, MediscreenError> {
        Ok(self.service.find_by_family_name(&family_name)?.into())
    }

    /// List all patients.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, MediscreenError> {
        let patients = self.service.list_all()?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Validate and create a new patient.
    pub fn create_patient(&self, input: FfiPatientInput) -> Result<FfiPatient, MediscreenError> {
        let candidate = PatientCandidate::try_from(input)?;
        Ok(self.service.create(&candidate)?.into())
    }

    /// Create a patient from positional fields.
    pub fn add_patient(
        &self,
        family: String,
        given: String,
        dob: String,
        sex: String,
        address: String,
        phone: String,
    ) -> Result<FfiPatient, MediscreenError> {
        self.create_patient(FfiPatientInput {
            last_name: Some(family),
            first_name: Some(given),
            birthdate: Some(dob),
            sex: Some(sex),
            address: Some(address),
            phone: Some(phone),
        })
    }

    /// Replace every mutable field of an existing patient.
    pub fn update_patient(
        &self,
        id: i64,
        input: FfiPatientInput,
    ) -> Result<FfiPatient, MediscreenError> {
        let candidate = PatientCandidate::try_from(input)?;
        Ok(self.service.update(id, &candidate)?.into())
    }

    /// Delete a patient by id.
    pub fn delete_patient(&self, id: i64) -> Result<(), MediscreenError> {
        Ok(self.service.delete(id)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient. `birthdate` is an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatient {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub birthdate: Option<String>,
    pub sex: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            last_name: patient.last_name,
            first_name: patient.first_name,
            birthdate: patient.birthdate.map(|d| d.to_string()),
            sex: patient.sex,
            address: patient.address,
            phone: patient.phone,
        }
    }
}

/// FFI-safe candidate record for create and update.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientInput {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub birthdate: Option<String>,
    pub sex: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl TryFrom<FfiPatientInput> for PatientCandidate {
    type Error = MediscreenError;

    fn try_from(input: FfiPatientInput) -> Result<Self, Self::Error> {
        let birthdate = input
            .birthdate
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| MediscreenError::InvalidInput(format!("Invalid birthdate: {}", raw)))
            })
            .transpose()?;

        Ok(PatientCandidate {
            last_name: input.last_name,
            first_name: input.first_name,
            birthdate,
            sex: input.sex,
            address: input.address,
            phone: input.phone,
        })
    }
}
