//! Patient models.

use serde::{Deserialize, Serialize};

use super::Assessment;

/// Child gender as captured by the screening form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Categorical screening outcome derived from the questionnaire answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// The wire form of this level.
    pub fn key(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// A patient record.
///
/// Deduplicated by the (name, phone) pair, not by `id`: the store creates
/// one record per distinct pair and updates it in place on later
/// submissions. JSON field names are camelCase to stay compatible with
/// previously exported data files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Generated unique id (UUID v4)
    pub id: String,
    /// Child name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Parent contact phone
    pub phone: String,
    /// Parent name
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Creation timestamp (ISO-8601)
    pub created_at: String,
    /// Timestamp of the most recent assessment (ISO-8601)
    pub last_assessment: String,
    /// Risk level from the most recent assessment
    pub risk_level: RiskLevel,
}

impl Patient {
    /// Create a new patient from the first assessment submitted for a
    /// (name, phone) pair.
    pub fn new_from_assessment(assessment: &Assessment) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: assessment.child_name.clone(),
            age: assessment.child_age,
            gender: assessment.child_gender,
            phone: assessment.parent_phone.clone(),
            parent_name: assessment.parent_name.clone(),
            created_at: assessment.timestamp.clone(),
            last_assessment: assessment.timestamp.clone(),
            risk_level: assessment.risk_level,
        }
    }

    /// Whether this assessment belongs to this patient. Assessments carry
    /// no foreign key; the linkage is (childName, parentPhone) equality.
    pub fn owns(&self, assessment: &Assessment) -> bool {
        self.name == assessment.child_name && self.phone == assessment.parent_phone
    }

    /// Fold a follow-up assessment for the same (name, phone) pair into
    /// this record.
    pub fn apply_assessment(&mut self, assessment: &Assessment) {
        self.age = assessment.child_age;
        self.last_assessment = assessment.timestamp.clone();
        self.risk_level = assessment.risk_level;
    }
}
