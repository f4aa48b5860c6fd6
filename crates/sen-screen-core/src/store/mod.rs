//! The record store: the single owner of both collections.
//!
//! All mutation goes through the operations here; readers get cloned
//! snapshots. Every public operation is one whole step (read, compute,
//! mutate, persist) with no suspension point, so callers can treat each
//! call as atomic.

mod reports;

pub use reports::*;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::db::{self, Database, DbError};
use crate::export::{self, Snapshot, SnapshotError};
use crate::models::{Assessment, AssessmentSubmission, Patient, RiskLevel};
use crate::scoring;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] DbError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Optional listing filter; both criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientFilter {
    /// Case-insensitive substring match against name OR phone.
    pub text_query: Option<String>,
    /// Exact risk level match.
    pub risk_level: Option<RiskLevel>,
}

impl PatientFilter {
    fn matches(&self, patient: &Patient) -> bool {
        let text_ok = match self.text_query.as_deref() {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                patient.name.to_lowercase().contains(&query)
                    || patient.phone.to_lowercase().contains(&query)
            }
            _ => true,
        };

        let risk_ok = self
            .risk_level
            .map_or(true, |level| patient.risk_level == level);

        text_ok && risk_ok
    }
}

/// The record store, owning the patients and assessments collections and
/// their persisted mirror.
pub struct Store {
    db: Database,
    patients: Vec<Patient>,
    assessments: Vec<Assessment>,
}

impl Store {
    /// Open the store backed by a database file, loading both
    /// collections. Missing keys load as empty collections.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::from_db(Database::open(path)?)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_db(Database::open_in_memory()?)
    }

    fn from_db(db: Database) -> StoreResult<Self> {
        let patients: Vec<Patient> = db.load_collection(db::PATIENTS_KEY)?;
        let assessments: Vec<Assessment> = db.load_collection(db::ASSESSMENTS_KEY)?;
        debug!(
            patients = patients.len(),
            assessments = assessments.len(),
            "loaded collections"
        );
        Ok(Self {
            db,
            patients,
            assessments,
        })
    }

    /// Submit a completed questionnaire.
    ///
    /// Scores the answers, appends the assessment, upserts the patient
    /// keyed by (name, phone), and persists both collections. If the
    /// persist step fails the in-memory mutation is kept and the error is
    /// returned for the caller to surface.
    pub fn submit_assessment(
        &mut self,
        submission: AssessmentSubmission,
    ) -> StoreResult<(Assessment, Patient)> {
        let risk_level = scoring::score_risk_level(&submission.answers);
        let assessment = Assessment::new(submission, risk_level);

        let patient = self.upsert_patient(&assessment);
        self.assessments.push(assessment.clone());
        self.persist()?;

        info!(
            patient_id = %patient.id,
            risk_level = patient.risk_level.key(),
            "assessment submitted"
        );
        Ok((assessment, patient))
    }

    /// Insert-or-update the patient matching the assessment's
    /// (childName, parentPhone) pair: linear scan, first match.
    fn upsert_patient(&mut self, assessment: &Assessment) -> Patient {
        if let Some(patient) = self.patients.iter_mut().find(|p| p.owns(assessment)) {
            patient.apply_assessment(assessment);
            patient.clone()
        } else {
            let patient = Patient::new_from_assessment(assessment);
            self.patients.push(patient.clone());
            patient
        }
    }

    fn persist(&mut self) -> StoreResult<()> {
        self.db.save_collections(
            db::PATIENTS_KEY,
            &self.patients,
            db::ASSESSMENTS_KEY,
            &self.assessments,
        )?;
        Ok(())
    }

    /// List patients matching the filter, in insertion order.
    pub fn list_patients(&self, filter: &PatientFilter) -> Vec<Patient> {
        self.patients
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// All assessments belonging to a patient, in submission order.
    /// An unknown id yields an empty history.
    pub fn get_patient_history(&self, patient_id: &str) -> Vec<Assessment> {
        let Some(patient) = self.patients.iter().find(|p| p.id == patient_id) else {
            return Vec::new();
        };
        self.assessments
            .iter()
            .filter(|a| patient.owns(a))
            .cloned()
            .collect()
    }

    /// Snapshot both collections for export.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::new(self.patients.clone(), self.assessments.clone())
    }

    /// Replace both collections from an import document.
    ///
    /// Both keys are persisted in one transaction and the in-memory
    /// collections are replaced only after the write commits, so a failed
    /// import leaves memory and disk untouched.
    pub fn import_snapshot(&mut self, raw: &str) -> StoreResult<()> {
        let snapshot = export::parse_snapshot(raw)?;

        self.db.save_collections(
            db::PATIENTS_KEY,
            &snapshot.patients,
            db::ASSESSMENTS_KEY,
            &snapshot.assessments,
        )?;
        self.patients = snapshot.patients;
        self.assessments = snapshot.assessments;

        info!(
            patients = self.patients.len(),
            assessments = self.assessments.len(),
            "snapshot imported"
        );
        Ok(())
    }

    /// All patients, in insertion order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// All assessments, in submission order.
    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }
}
