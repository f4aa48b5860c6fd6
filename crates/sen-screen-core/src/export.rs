//! Snapshot export and import of both collections.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Assessment, Patient};

/// Snapshot errors, split into the two distinct failure kinds the
/// import boundary reports.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(serde_json::Error),

    #[error("snapshot must contain `patients` and `assessments` collections")]
    MissingCollections,

    #[error("snapshot records are malformed: {0}")]
    InvalidRecords(serde_json::Error),
}

/// A full serialized copy of both collections.
///
/// The export document carries exactly three top-level fields:
/// `patients`, `assessments`, and `exportDate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub patients: Vec<Patient>,
    pub assessments: Vec<Assessment>,
    #[serde(rename = "exportDate", default)]
    pub export_date: String,
}

impl Snapshot {
    /// Snapshot the given collections, stamped with the current time.
    pub fn new(patients: Vec<Patient>, assessments: Vec<Assessment>) -> Self {
        Self {
            patients,
            assessments,
            export_date: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Export to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Conventional file name for an exported snapshot:
    /// `sen-data-<ISO-date>.json`. Cosmetic, not part of the format.
    pub fn suggested_file_name(&self) -> String {
        format!(
            "sen-data-{}.json",
            chrono::Utc::now().format("%Y-%m-%d")
        )
    }
}

/// Parse and validate an import document.
///
/// Accepted iff the input is valid JSON whose `patients` and
/// `assessments` fields are present, non-null, and deserialize as the
/// corresponding arrays. Unrecognized answer values inside assessment
/// records are coerced to unanswered rather than rejected.
pub fn parse_snapshot(raw: &str) -> Result<Snapshot, SnapshotError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;

    let patients = value
        .get("patients")
        .filter(|v| !v.is_null())
        .ok_or(SnapshotError::MissingCollections)?;
    let assessments = value
        .get("assessments")
        .filter(|v| !v.is_null())
        .ok_or(SnapshotError::MissingCollections)?;

    let patients: Vec<Patient> =
        serde_json::from_value(patients.clone()).map_err(SnapshotError::InvalidRecords)?;
    let assessments: Vec<Assessment> =
        serde_json::from_value(assessments.clone()).map_err(SnapshotError::InvalidRecords)?;

    let export_date = value
        .get("exportDate")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Snapshot {
        patients,
        assessments,
        export_date,
    })
}
