//! Patient record service.
//!
//! The only place business rules live: create is validated, lookups and
//! mutations of a missing key become [`PatientError::NotFound`].

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Patient, PatientCandidate, PatientId};
use crate::store::{PatientStore, StoreError};
use crate::validation::{self, ValidationError};

/// Key a lookup or mutation was addressed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientKey {
    Id(PatientId),
    FamilyName(String),
}

impl fmt::Display for PatientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientKey::Id(id) => write!(f, "id : {}", id),
            PatientKey::FamilyName(name) => write!(f, "name : {}", name),
        }
    }
}

/// Service errors.
#[derive(Error, Debug)]
pub enum PatientError {
    #[error("Patient does not exist with {0}")]
    NotFound(PatientKey),

    #[error("{0}")]
    InvalidInput(ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for PatientError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PatientError::LockPoisoned(e.to_string())
    }
}

pub type PatientResult<T> = Result<T, PatientError>;

/// Wraps a record store with validation and not-found semantics.
///
/// Every store call takes the lock on its own. `update` and `delete` look the
/// record up and then mutate it in two separate calls, so a concurrent delete
/// can land in between; that case is reported as not found.
pub struct PatientService<S> {
    store: Mutex<S>,
}

impl<S: PatientStore> PatientService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    fn store(&self) -> PatientResult<MutexGuard<'_, S>> {
        Ok(self.store.lock()?)
    }

    /// Find a patient by id.
    pub fn find_by_id(&self, id: PatientId) -> PatientResult<Patient> {
        debug!("Finding patient with id: {}", id);
        let patient = self.store()?.get_by_id(id)?.ok_or_else(|| not_found_id(id))?;
        debug!("Found patient: {:?}", patient);
        Ok(patient)
    }

    /// Find a patient by exact family name.
    pub fn find_by_family_name(&self, last_name: &str) -> PatientResult<Patient> {
        debug!("Finding patient with family name: {}", last_name);
        let patient = self
            .store()?
            .get_by_family_name(last_name)?
            .ok_or_else(|| {
                let key = PatientKey::FamilyName(last_name.to_string());
                warn!("Patient does not exist with {}", key);
                PatientError::NotFound(key)
            })?;
        debug!("Found patient: {:?}", patient);
        Ok(patient)
    }

    /// All patients. An empty list is not an error.
    pub fn list_all(&self) -> PatientResult<Vec<Patient>> {
        debug!("Getting all patients");
        let patients = self.store()?.list_all()?;
        debug!("Found {} patients", patients.len());
        Ok(patients)
    }

    /// Validate and store a new patient.
    pub fn create(&self, candidate: &PatientCandidate) -> PatientResult<Patient> {
        debug!("Creating patient: {:?}", candidate);
        if let Err(reason) = validation::validate(candidate) {
            debug!("Rejected patient: {}", reason);
            return Err(PatientError::InvalidInput(reason));
        }
        let patient = self.store()?.insert(candidate)?;
        debug!("Created patient: {:?}", patient);
        Ok(patient)
    }

    /// Replace every mutable field of an existing patient.
    ///
    /// No validation is applied here, unlike [`PatientService::create`].
    pub fn update(&self, id: PatientId, candidate: &PatientCandidate) -> PatientResult<Patient> {
        debug!("Updating patient with id: {} and data: {:?}", id, candidate);
        self.find_by_id(id)?;
        let patient = self
            .store()?
            .update(id, candidate)?
            .ok_or_else(|| not_found_id(id))?;
        debug!("Updated patient: {:?}", patient);
        Ok(patient)
    }

    /// Permanently remove an existing patient.
    pub fn delete(&self, id: PatientId) -> PatientResult<()> {
        debug!("Processing delete patient request for id: {}", id);
        self.find_by_id(id)?;
        if !self.store()?.delete(id)? {
            return Err(not_found_id(id));
        }
        debug!("Patient with id: {} deleted successfully", id);
        Ok(())
    }
}

fn not_found_id(id: PatientId) -> PatientError {
    let key = PatientKey::Id(id);
    warn!("Patient does not exist with {}", key);
    PatientError::NotFound(key)
}
