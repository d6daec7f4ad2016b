//! Field checks applied to a candidate before it is created.

use thiserror::Error;

use crate::models::PatientCandidate;

/// Reason a candidate was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Last Name is mandatory")]
    MissingLastName,

    #[error("First Name is mandatory")]
    MissingFirstName,

    #[error("Birthday is mandatory")]
    MissingBirthdate,

    #[error("M for Male or F for Female")]
    InvalidSex,
}

/// Accepted sex codes. Matching is exact and case-sensitive.
pub const SEX_CODES: [&str; 2] = ["M", "F"];

/// Check a candidate, returning the first failing rule.
pub fn validate(candidate: &PatientCandidate) -> Result<(), ValidationError> {
    match violations(candidate).into_iter().next() {
        Some(reason) => Err(reason),
        None => Ok(()),
    }
}

/// Every failing rule, in check order.
pub fn violations(candidate: &PatientCandidate) -> Vec<ValidationError> {
    let mut found = Vec::new();

    if is_blank(candidate.last_name.as_deref()) {
        found.push(ValidationError::MissingLastName);
    }
    if is_blank(candidate.first_name.as_deref()) {
        found.push(ValidationError::MissingFirstName);
    }
    if candidate.birthdate.is_none() {
        found.push(ValidationError::MissingBirthdate);
    }
    if let Some(sex) = candidate.sex.as_deref() {
        if !SEX_CODES.contains(&sex) {
            found.push(ValidationError::InvalidSex);
        }
    }

    found
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid() -> PatientCandidate {
        PatientCandidate::new("Doe", "John")
            .with_birthdate(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
            .with_sex("M")
    }

    #[test]
    fn test_valid_candidate() {
        assert_eq!(validate(&valid()), Ok(()));
        assert!(violations(&valid()).is_empty());
    }

    #[test]
    fn test_sex_is_optional() {
        let mut candidate = valid();
        candidate.sex = None;
        assert_eq!(validate(&candidate), Ok(()));
    }

    #[test]
    fn test_blank_last_name() {
        let mut candidate = valid();
        candidate.last_name = Some("   ".into());
        assert_eq!(validate(&candidate), Err(ValidationError::MissingLastName));

        candidate.last_name = None;
        assert_eq!(validate(&candidate), Err(ValidationError::MissingLastName));
    }

    #[test]
    fn test_blank_first_name() {
        let mut candidate = valid();
        candidate.first_name = Some("\t".into());
        assert_eq!(validate(&candidate), Err(ValidationError::MissingFirstName));
    }

    #[test]
    fn test_missing_birthdate() {
        let mut candidate = valid();
        candidate.birthdate = None;
        assert_eq!(validate(&candidate), Err(ValidationError::MissingBirthdate));
    }

    #[test]
    fn test_invalid_sex_codes() {
        for code in ["m", "f", "X", "MF", "", " M", "|"] {
            let candidate = valid().with_sex(code);
            assert_eq!(
                validate(&candidate),
                Err(ValidationError::InvalidSex),
                "code {:?} should be rejected",
                code
            );
        }
        assert_eq!(validate(&valid().with_sex("F")), Ok(()));
    }

    #[test]
    fn test_violations_reports_all_in_order() {
        let candidate = PatientCandidate {
            sex: Some("x".into()),
            ..PatientCandidate::default()
        };
        assert_eq!(
            violations(&candidate),
            vec![
                ValidationError::MissingLastName,
                ValidationError::MissingFirstName,
                ValidationError::MissingBirthdate,
                ValidationError::InvalidSex,
            ]
        );
        assert_eq!(validate(&candidate), Err(ValidationError::MissingLastName));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::MissingLastName.to_string(), "Last Name is mandatory");
        assert_eq!(ValidationError::InvalidSex.to_string(), "M for Male or F for Female");
    }
}
