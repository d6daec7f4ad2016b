//! Record store contract.
//!
//! Absence is always `None`/`false`; only backend failures are errors. The
//! service layer alone decides how a missing record is reported.

mod memory;

pub use memory::*;

use thiserror::Error;

use crate::models::{Patient, PatientCandidate, PatientId};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed storage for patient records.
///
/// Each call is atomic on its own. No multi-call transactions are offered.
pub trait PatientStore {
    /// Store a new record under a fresh id that has never been handed out before.
    fn insert(&mut self, candidate: &PatientCandidate) -> StoreResult<Patient>;

    fn get_by_id(&self, id: PatientId) -> StoreResult<Option<Patient>>;

    /// Exact, case-sensitive family name match. Which record is returned when
    /// several share the name is up to the implementation.
    fn get_by_family_name(&self, last_name: &str) -> StoreResult<Option<Patient>>;

    /// All records in id order.
    fn list_all(&self) -> StoreResult<Vec<Patient>>;

    /// Overwrite every mutable field of record `id`. `None` if it does not exist.
    fn update(&mut self, id: PatientId, candidate: &PatientCandidate)
        -> StoreResult<Option<Patient>>;

    /// Remove record `id`. `false` if it did not exist.
    fn delete(&mut self, id: PatientId) -> StoreResult<bool>;
}

/// Type-erased store, for picking a backend at startup.
pub type DynStore = Box<dyn PatientStore + Send>;

impl<S: PatientStore + ?Sized> PatientStore for Box<S> {
    fn insert(&mut self, candidate: &PatientCandidate) -> StoreResult<Patient> {
        (**self).insert(candidate)
    }

    fn get_by_id(&self, id: PatientId) -> StoreResult<Option<Patient>> {
        (**self).get_by_id(id)
    }

    fn get_by_family_name(&self, last_name: &str) -> StoreResult<Option<Patient>> {
        (**self).get_by_family_name(last_name)
    }

    fn list_all(&self) -> StoreResult<Vec<Patient>> {
        (**self).list_all()
    }

    fn update(
        &mut self,
        id: PatientId,
        candidate: &PatientCandidate,
    ) -> StoreResult<Option<Patient>> {
        (**self).update(id, candidate)
    }

    fn delete(&mut self, id: PatientId) -> StoreResult<bool> {
        (**self).delete(id)
    }
}
