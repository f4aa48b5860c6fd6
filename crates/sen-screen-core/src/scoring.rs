//! Risk scoring for submitted questionnaires.
//!
//! Pure functions over an [`AnswerSet`]: no state, no side effects. The
//! overall risk tier and the per-domain ratings deliberately disagree on
//! how to treat unanswered questions:
//!
//! - the overall score keeps a fixed denominator of 8 × 4, so an
//!   unanswered question counts as 0/4 and pushes the result toward a
//!   higher risk tier (incompleteness is penalized);
//! - a domain rating averages only the answered questions of that
//!   domain, and a domain with no answers is reported as not assessed.

use serde::{Deserialize, Serialize};

use crate::models::{AnswerSet, Domain, QuestionId, RiskLevel};

/// Highest weight a single answer can contribute.
const MAX_WEIGHT: u32 = 4;

/// Fixed maximum total score: every question counts toward the
/// denominator whether or not it was answered.
pub const MAX_SCORE: u32 = QuestionId::ALL.len() as u32 * MAX_WEIGHT;

/// Qualitative rating for one domain of one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainRating {
    #[serde(rename = "excellent")]
    Excellent,
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "needs attention")]
    NeedsAttention,
    #[serde(rename = "not assessed")]
    NotAssessed,
}

impl DomainRating {
    /// Human-readable label, identical to the wire form.
    pub fn label(self) -> &'static str {
        match self {
            DomainRating::Excellent => "excellent",
            DomainRating::Good => "good",
            DomainRating::Fair => "fair",
            DomainRating::NeedsAttention => "needs attention",
            DomainRating::NotAssessed => "not assessed",
        }
    }
}

/// Derive the overall risk tier from a set of answers.
///
/// Tiers use inclusive lower bounds, evaluated high-to-low: 75% and above
/// is low risk, 50% and above is medium, anything below is high.
pub fn score_risk_level(answers: &AnswerSet) -> RiskLevel {
    let score: u32 = QuestionId::ALL
        .iter()
        .filter_map(|q| answers.get(*q))
        .map(|a| a.weight())
        .sum();

    let percentage = f64::from(score) / f64::from(MAX_SCORE) * 100.0;

    if percentage >= 75.0 {
        RiskLevel::Low
    } else if percentage >= 50.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Qualitative rating of one domain, averaging only its answered
/// questions.
pub fn domain_rating(answers: &AnswerSet, domain: Domain) -> DomainRating {
    let weights: Vec<u32> = domain
        .questions()
        .iter()
        .filter_map(|q| answers.get(*q))
        .map(|a| a.weight())
        .collect();

    if weights.is_empty() {
        return DomainRating::NotAssessed;
    }

    let avg = f64::from(weights.iter().sum::<u32>()) / weights.len() as f64;

    if avg >= 3.5 {
        DomainRating::Excellent
    } else if avg >= 2.5 {
        DomainRating::Good
    } else if avg >= 1.5 {
        DomainRating::Fair
    } else {
        DomainRating::NeedsAttention
    }
}

/// Ratings for all four domains, in questionnaire order.
pub fn domain_ratings(answers: &AnswerSet) -> [(Domain, DomainRating); 4] {
    Domain::ALL.map(|domain| (domain, domain_rating(answers, domain)))
}
