//! Record validation
//!
//! Classifies each record as valid / warning / error. A missing name is the
//! only condition that forces an error; everything else is a warning. The
//! classification is a pure function of the record's current field values
//! and is re-run after every edit.

use super::record::{RecordStatus, TempleRecord};

/// Outcome of validating one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub status: RecordStatus,
    /// Human-readable issue list for the review displays
    pub issues: Vec<String>,
}

/// Validate a record, returning its status and the per-field issues
pub fn check(record: &TempleRecord) -> Validation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if record.name.is_empty() {
        errors.push("Missing name".to_string());
    }
    if record.city.is_empty() {
        warnings.push("Missing city".to_string());
    }
    if record.state.is_empty() {
        warnings.push("Missing state".to_string());
    }
    if !record.phone.is_empty() && record.phone.len() < 10 {
        warnings.push("Invalid phone".to_string());
    }
    if !record.website.is_empty() && !record.website.contains('.') {
        warnings.push("Invalid website".to_string());
    }

    let status = if !errors.is_empty() {
        RecordStatus::Error
    } else if !warnings.is_empty() {
        RecordStatus::Warning
    } else {
        RecordStatus::Valid
    };

    errors.extend(warnings);
    Validation {
        status,
        issues: errors,
    }
}

/// Shortcut when only the classification is needed
pub fn status_of(record: &TempleRecord) -> RecordStatus {
    check(record).status
}
