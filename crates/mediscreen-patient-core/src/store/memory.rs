//! In-process arena store.

use std::collections::BTreeMap;

use super::{PatientStore, StoreResult};
use crate::models::{Patient, PatientCandidate, PatientId};

/// Arena of records keyed by id, owning its own id counter.
///
/// Ids start at 1 and increase monotonically; deleted ids are never reused.
#[derive(Debug)]
pub struct MemoryStore {
    records: BTreeMap<PatientId, Patient>,
    next_id: PatientId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientStore for MemoryStore {
    fn insert(&mut self, candidate: &PatientCandidate) -> StoreResult<Patient> {
        let id = self.next_id;
        self.next_id += 1;

        let patient = candidate.clone().into_patient(id);
        self.records.insert(id, patient.clone());
        Ok(patient)
    }

    fn get_by_id(&self, id: PatientId) -> StoreResult<Option<Patient>> {
        Ok(self.records.get(&id).cloned())
    }

    fn get_by_family_name(&self, last_name: &str) -> StoreResult<Option<Patient>> {
        // BTreeMap iteration is in id order, so the lowest id wins.
        Ok(self
            .records
            .values()
            .find(|p| p.last_name == last_name)
            .cloned())
    }

    fn list_all(&self) -> StoreResult<Vec<Patient>> {
        Ok(self.records.values().cloned().collect())
    }

    fn update(
        &mut self,
        id: PatientId,
        candidate: &PatientCandidate,
    ) -> StoreResult<Option<Patient>> {
        Ok(self.records.get_mut(&id).map(|patient| {
            patient.replace_with(candidate);
            patient.clone()
        }))
    }

    fn delete(&mut self, id: PatientId) -> StoreResult<bool> {
        Ok(self.records.remove(&id).is_some())
    }
}
