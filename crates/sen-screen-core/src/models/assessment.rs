//! Assessment models: the submitted form and the stored record.

use serde::{Deserialize, Serialize};

use super::{AnswerSet, Gender, RiskLevel};

/// A questionnaire as submitted by the presentation layer, before the
/// store assigns an id, timestamp, and risk level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    /// Assessment date from the form (ISO date)
    pub assessment_date: String,
    /// Child name
    pub child_name: String,
    /// Child age in years
    pub child_age: u32,
    /// Child gender
    pub child_gender: Gender,
    /// Parent name
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Parent contact phone
    pub parent_phone: String,
    /// The eight questionnaire answers
    #[serde(flatten)]
    pub answers: AnswerSet,
    /// Free-text notes
    #[serde(default)]
    pub additional_notes: Option<String>,
}

/// A stored assessment record. Append-only: never mutated after
/// submission except by wholesale snapshot import.
///
/// The eight answers are flattened into the record under their form keys,
/// matching the persisted JSON of previously exported data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Generated unique id (UUID v4)
    pub id: String,
    /// Submission timestamp (ISO-8601)
    pub timestamp: String,
    /// Assessment date from the form (ISO date)
    pub assessment_date: String,
    /// Child name
    pub child_name: String,
    /// Child age in years
    pub child_age: u32,
    /// Child gender
    pub child_gender: Gender,
    /// Parent name
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Parent contact phone
    pub parent_phone: String,
    /// The eight questionnaire answers
    #[serde(flatten)]
    pub answers: AnswerSet,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    /// Risk level derived from the answers at submission time
    pub risk_level: RiskLevel,
}

impl Assessment {
    /// Build the stored record from a submission and its derived risk
    /// level, assigning a fresh id and the current timestamp.
    pub fn new(submission: AssessmentSubmission, risk_level: RiskLevel) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            assessment_date: submission.assessment_date,
            child_name: submission.child_name,
            child_age: submission.child_age,
            child_gender: submission.child_gender,
            parent_name: submission.parent_name,
            parent_phone: submission.parent_phone,
            answers: submission.answers,
            additional_notes: submission.additional_notes,
            risk_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerValue;

    fn make_submission() -> AssessmentSubmission {
        AssessmentSubmission {
            assessment_date: "2024-03-01".into(),
            child_name: "Siu Ling".into(),
            child_age: 4,
            child_gender: Gender::Female,
            parent_name: None,
            parent_phone: "98765432".into(),
            answers: AnswerSet::uniform(AnswerValue::Fair),
            additional_notes: Some("slow to respond to name".into()),
        }
    }

    #[test]
    fn test_new_assigns_identity() {
        let assessment = Assessment::new(make_submission(), RiskLevel::Medium);

        assert_eq!(assessment.id.len(), 36);
        assert!(!assessment.timestamp.is_empty());
        assert_eq!(assessment.child_name, "Siu Ling");
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_answers_flattened_in_json() {
        let assessment = Assessment::new(make_submission(), RiskLevel::Medium);
        let json = serde_json::to_value(&assessment).unwrap();

        // Answers sit at the top level under their form keys
        assert_eq!(json["language1"], "fair");
        assert_eq!(json["behavior2"], "fair");
        assert_eq!(json["childName"], "Siu Ling");
        assert_eq!(json["parentPhone"], "98765432");
        assert_eq!(json["additionalNotes"], "slow to respond to name");
        assert_eq!(json["riskLevel"], "medium");
        assert!(json.get("answers").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let assessment = Assessment::new(make_submission(), RiskLevel::Medium);
        let json = serde_json::to_string(&assessment).unwrap();
        let back: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, assessment);
    }

    #[test]
    fn test_foreign_record_with_unknown_answer_values() {
        // Records written by other tools may hold answer values we do not
        // recognize; they load as unanswered instead of failing.
        let raw = r#"{
            "id": "abc123",
            "timestamp": "2024-01-15T10:00:00Z",
            "assessmentDate": "2024-01-15",
            "childName": "Test",
            "childAge": 7,
            "childGender": "male",
            "parentPhone": "912",
            "language1": "excellent",
            "language2": "very-good",
            "riskLevel": "high"
        }"#;

        let assessment: Assessment = serde_json::from_str(raw).unwrap();
        assert_eq!(assessment.answers.language1, Some(AnswerValue::Excellent));
        assert_eq!(assessment.answers.language2, None);
        assert_eq!(assessment.answers.answered_count(), 1);
        assert_eq!(assessment.parent_name, None);
    }
}
