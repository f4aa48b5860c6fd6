//! Questionnaire structure: domains, question ids, and answer values.

use serde::{Deserialize, Deserializer, Serialize};

/// A developmental domain assessed by the screening questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Language,
    Social,
    Cognitive,
    Behavior,
}

impl Domain {
    /// All four domains, in questionnaire order.
    pub const ALL: [Domain; 4] = [
        Domain::Language,
        Domain::Social,
        Domain::Cognitive,
        Domain::Behavior,
    ];

    /// The two questions belonging to this domain.
    pub fn questions(self) -> [QuestionId; 2] {
        match self {
            Domain::Language => [QuestionId::Language1, QuestionId::Language2],
            Domain::Social => [QuestionId::Social1, QuestionId::Social2],
            Domain::Cognitive => [QuestionId::Cognitive1, QuestionId::Cognitive2],
            Domain::Behavior => [QuestionId::Behavior1, QuestionId::Behavior2],
        }
    }
}

/// One of the eight recognized screening questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionId {
    Language1,
    Language2,
    Social1,
    Social2,
    Cognitive1,
    Cognitive2,
    Behavior1,
    Behavior2,
}

impl QuestionId {
    /// All eight questions, in questionnaire order.
    pub const ALL: [QuestionId; 8] = [
        QuestionId::Language1,
        QuestionId::Language2,
        QuestionId::Social1,
        QuestionId::Social2,
        QuestionId::Cognitive1,
        QuestionId::Cognitive2,
        QuestionId::Behavior1,
        QuestionId::Behavior2,
    ];

    /// The domain this question belongs to.
    pub fn domain(self) -> Domain {
        match self {
            QuestionId::Language1 | QuestionId::Language2 => Domain::Language,
            QuestionId::Social1 | QuestionId::Social2 => Domain::Social,
            QuestionId::Cognitive1 | QuestionId::Cognitive2 => Domain::Cognitive,
            QuestionId::Behavior1 | QuestionId::Behavior2 => Domain::Behavior,
        }
    }

    /// The wire/form key for this question (matches the persisted JSON).
    pub fn key(self) -> &'static str {
        match self {
            QuestionId::Language1 => "language1",
            QuestionId::Language2 => "language2",
            QuestionId::Social1 => "social1",
            QuestionId::Social2 => "social2",
            QuestionId::Cognitive1 => "cognitive1",
            QuestionId::Cognitive2 => "cognitive2",
            QuestionId::Behavior1 => "behavior1",
            QuestionId::Behavior2 => "behavior2",
        }
    }
}

/// A categorical answer to a screening question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerValue {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AnswerValue {
    /// Integer weight used by the scoring engine.
    pub fn weight(self) -> u32 {
        match self {
            AnswerValue::Excellent => 4,
            AnswerValue::Good => 3,
            AnswerValue::Fair => 2,
            AnswerValue::Poor => 1,
        }
    }

    /// The wire form of this answer.
    pub fn key(self) -> &'static str {
        match self {
            AnswerValue::Excellent => "excellent",
            AnswerValue::Good => "good",
            AnswerValue::Fair => "fair",
            AnswerValue::Poor => "poor",
        }
    }

    /// Parse a wire value. Unrecognized values yield `None` so they score
    /// as unanswered rather than being rejected.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "excellent" => Some(AnswerValue::Excellent),
            "good" => Some(AnswerValue::Good),
            "fair" => Some(AnswerValue::Fair),
            "poor" => Some(AnswerValue::Poor),
            _ => None,
        }
    }
}

/// The eight answers of one submitted questionnaire.
///
/// Fields are flattened into the assessment JSON under their original form
/// keys (`language1` .. `behavior2`). Any answer may be absent; absent and
/// unrecognized answers are treated as unanswered everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub language1: Option<AnswerValue>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub language2: Option<AnswerValue>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub social1: Option<AnswerValue>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub social2: Option<AnswerValue>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cognitive1: Option<AnswerValue>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cognitive2: Option<AnswerValue>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub behavior1: Option<AnswerValue>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub behavior2: Option<AnswerValue>,
}

impl AnswerSet {
    /// Build a set answering every question with the same value.
    pub fn uniform(value: AnswerValue) -> Self {
        let mut answers = Self::default();
        for question in QuestionId::ALL {
            answers.set(question, Some(value));
        }
        answers
    }

    /// Look up the answer to a question.
    pub fn get(&self, question: QuestionId) -> Option<AnswerValue> {
        match question {
            QuestionId::Language1 => self.language1,
            QuestionId::Language2 => self.language2,
            QuestionId::Social1 => self.social1,
            QuestionId::Social2 => self.social2,
            QuestionId::Cognitive1 => self.cognitive1,
            QuestionId::Cognitive2 => self.cognitive2,
            QuestionId::Behavior1 => self.behavior1,
            QuestionId::Behavior2 => self.behavior2,
        }
    }

    /// Set the answer to a question.
    pub fn set(&mut self, question: QuestionId, value: Option<AnswerValue>) {
        let slot = match question {
            QuestionId::Language1 => &mut self.language1,
            QuestionId::Language2 => &mut self.language2,
            QuestionId::Social1 => &mut self.social1,
            QuestionId::Social2 => &mut self.social2,
            QuestionId::Cognitive1 => &mut self.cognitive1,
            QuestionId::Cognitive2 => &mut self.cognitive2,
            QuestionId::Behavior1 => &mut self.behavior1,
            QuestionId::Behavior2 => &mut self.behavior2,
        };
        *slot = value;
    }

    /// Number of questions that carry a recognized answer.
    pub fn answered_count(&self) -> usize {
        QuestionId::ALL
            .iter()
            .filter(|q| self.get(**q).is_some())
            .count()
    }
}

/// Deserialize an answer leniently: `null`, non-string, and unrecognized
/// string values all become `None` instead of failing the whole record.
fn lenient<'de, D>(deserializer: D) -> Result<Option<AnswerValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(AnswerValue::from_key))
}
