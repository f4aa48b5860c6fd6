//! Aggregate reads for dashboard and report views.
//!
//! The presentation layer renders these; the store only computes them.

use chrono::Datelike;
use serde::Serialize;

use super::Store;
use crate::models::{Assessment, RiskLevel};

/// Headline counts for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub total_assessments: usize,
    pub high_risk_patients: usize,
    pub assessments_today: usize,
}

/// Patient counts per risk level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Patient counts per screening age band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeDistribution {
    /// Ages 3-5
    pub preschool: usize,
    /// Ages 6-8
    pub early_primary: usize,
    /// Ages 9-12
    pub late_primary: usize,
}

impl Store {
    /// Headline counts. `today` is the ISO date the caller considers
    /// current, compared against each assessment's form date.
    pub fn dashboard_summary(&self, today: &str) -> DashboardSummary {
        DashboardSummary {
            total_patients: self.patients().len(),
            total_assessments: self.assessments().len(),
            high_risk_patients: self
                .patients()
                .iter()
                .filter(|p| p.risk_level == RiskLevel::High)
                .count(),
            assessments_today: self
                .assessments()
                .iter()
                .filter(|a| a.assessment_date == today)
                .count(),
        }
    }

    /// Patient counts per risk level.
    pub fn risk_distribution(&self) -> RiskDistribution {
        let count = |level: RiskLevel| {
            self.patients()
                .iter()
                .filter(|p| p.risk_level == level)
                .count()
        };
        RiskDistribution {
            low: count(RiskLevel::Low),
            medium: count(RiskLevel::Medium),
            high: count(RiskLevel::High),
        }
    }

    /// Patient counts in the 3-5, 6-8, and 9-12 age bands. Ages outside
    /// the screening range fall into no band.
    pub fn age_distribution(&self) -> AgeDistribution {
        let count = |lo: u32, hi: u32| {
            self.patients()
                .iter()
                .filter(|p| p.age >= lo && p.age <= hi)
                .count()
        };
        AgeDistribution {
            preschool: count(3, 5),
            early_primary: count(6, 8),
            late_primary: count(9, 12),
        }
    }

    /// The last `limit` assessments, newest first.
    pub fn recent_assessments(&self, limit: usize) -> Vec<Assessment> {
        self.assessments()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of assessments whose submission timestamp falls in the
    /// given month. Unparsable timestamps are excluded.
    pub fn assessments_in_month(&self, year: i32, month: u32) -> usize {
        self.assessments()
            .iter()
            .filter_map(|a| chrono::DateTime::parse_from_rfc3339(&a.timestamp).ok())
            .filter(|t| t.year() == year && t.month() == month)
            .count()
    }
}
