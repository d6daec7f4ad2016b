//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::models::{Patient, PatientCandidate, PatientId};
use crate::store::{PatientStore, StoreResult};

const PATIENT_COLUMNS: &str = "id, last_name, first_name, birthdate, sex, address, phone";

fn row_to_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        birthdate: row.get(3)?,
        sex: row.get(4)?,
        address: row.get(5)?,
        phone: row.get(6)?,
    })
}

impl PatientStore for Database {
    fn insert(&mut self, candidate: &PatientCandidate) -> StoreResult<Patient> {
        self.conn.execute(
            r#"
            INSERT INTO patient (
                last_name, first_name, birthdate, sex, address, phone
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                candidate.last_name.as_deref().unwrap_or_default(),
                candidate.first_name.as_deref().unwrap_or_default(),
                candidate.birthdate,
                candidate.sex,
                candidate.address,
                candidate.phone,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(candidate.clone().into_patient(id))
    }

    fn get_by_id(&self, id: PatientId) -> StoreResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patient WHERE id = ?", PATIENT_COLUMNS),
                [id],
                row_to_patient,
            )
            .optional()
            .map_err(Into::into)
    }

    fn get_by_family_name(&self, last_name: &str) -> StoreResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM patient WHERE last_name = ? ORDER BY id LIMIT 1",
                    PATIENT_COLUMNS
                ),
                [last_name],
                row_to_patient,
            )
            .optional()
            .map_err(Into::into)
    }

    fn list_all(&self) -> StoreResult<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM patient ORDER BY id", PATIENT_COLUMNS))?;

        let rows = stmt.query_map([], row_to_patient)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn update(
        &mut self,
        id: PatientId,
        candidate: &PatientCandidate,
    ) -> StoreResult<Option<Patient>> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patient SET
                last_name = ?2,
                first_name = ?3,
                birthdate = ?4,
                sex = ?5,
                address = ?6,
                phone = ?7
            WHERE id = ?1
            "#,
            params![
                id,
                candidate.last_name.as_deref().unwrap_or_default(),
                candidate.first_name.as_deref().unwrap_or_default(),
                candidate.birthdate,
                candidate.sex,
                candidate.address,
                candidate.phone,
            ],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(candidate.clone().into_patient(id)))
    }

    fn delete(&mut self, id: PatientId) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patient WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
