//! SQLite schema definition.

/// Complete database schema.
///
/// `AUTOINCREMENT` keeps ids from being reused after a delete.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS patient (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    last_name TEXT NOT NULL,
    first_name TEXT NOT NULL,
    birthdate TEXT,                              -- ISO 8601 date, YYYY-MM-DD
    sex TEXT,                                    -- 'M' or 'F' when created through validation
    address TEXT,
    phone TEXT
);

CREATE INDEX IF NOT EXISTS idx_patient_last_name ON patient(last_name);
"#;
