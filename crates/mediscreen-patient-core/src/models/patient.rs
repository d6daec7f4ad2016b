//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned patient identifier.
pub type PatientId = i64;

/// A stored patient demographic record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Assigned by the store on insert, never changes afterwards
    pub id: PatientId,
    /// Family name
    pub last_name: String,
    /// Given name
    pub first_name: String,
    /// Date of birth
    pub birthdate: Option<NaiveDate>,
    /// "M" or "F" when validated on create
    pub sex: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Phone number
    pub phone: Option<String>,
}

impl Patient {
    /// The mutable fields of this record as a candidate.
    pub fn candidate(&self) -> PatientCandidate {
        PatientCandidate {
            last_name: Some(self.last_name.clone()),
            first_name: Some(self.first_name.clone()),
            birthdate: self.birthdate,
            sex: self.sex.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Overwrite every mutable field from `candidate`. The id is left alone.
    pub fn replace_with(&mut self, candidate: &PatientCandidate) {
        self.last_name = candidate.last_name.clone().unwrap_or_default();
        self.first_name = candidate.first_name.clone().unwrap_or_default();
        self.birthdate = candidate.birthdate;
        self.sex = candidate.sex.clone();
        self.address = candidate.address.clone();
        self.phone = candidate.phone.clone();
    }
}

/// A proposed record for create or replacement, not yet validated or persisted.
///
/// Every field is optional so that validation, rather than deserialization,
/// decides what is missing. Any `id` supplied on the wire is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientCandidate {
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PatientCandidate {
    /// Create a candidate with the two name fields set.
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: Some(last_name.into()),
            first_name: Some(first_name.into()),
            ..Self::default()
        }
    }

    /// Builder-style setter for the birthdate.
    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    /// Builder-style setter for the sex code.
    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    /// Builder-style setter for the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Builder-style setter for the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Attach a store-assigned id, producing the stored shape.
    ///
    /// Missing names become empty strings; only create rejects them.
    pub fn into_patient(self, id: PatientId) -> Patient {
        Patient {
            id,
            last_name: self.last_name.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            birthdate: self.birthdate,
            sex: self.sex,
            address: self.address,
            phone: self.phone,
        }
    }
}
