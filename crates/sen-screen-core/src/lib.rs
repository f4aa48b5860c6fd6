//! SEN Screen Core Library
//!
//! Local-first record keeping for a SEN (special educational needs)
//! developmental screening workflow.
//!
//! # Architecture
//!
//! ```text
//! Questionnaire submission
//!         │
//!         ▼
//!   Scoring Engine ──── risk level (pure function of the 8 answers)
//!         │
//!         ▼
//!   ┌─────────────────────────────┐
//!   │            Store            │
//!   │  append assessment          │
//!   │  upsert patient by          │
//!   │    (name, phone)            │
//!   │  persist both collections   │
//!   └──────────────┬──────────────┘
//!                  │
//!        ┌─────────┼──────────┐
//!        ▼         ▼          ▼
//!    Listing /  Patient   Snapshot
//!    filtering  history   export/import
//! ```
//!
//! The presentation layer (rendering, navigation, notifications,
//! localization) is an external collaborator: it calls these operations
//! and re-renders, and owns everything user-facing.
//!
//! # Modules
//!
//! - [`models`]: domain types (Patient, Assessment, AnswerSet, enums)
//! - [`scoring`]: pure risk tiering and per-domain ratings
//! - [`db`]: SQLite-backed key-value persistence
//! - [`store`]: the record store owning both collections
//! - [`export`]: snapshot export/import

pub mod db;
pub mod export;
pub mod models;
pub mod scoring;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use export::{Snapshot, SnapshotError};
pub use models::{
    AnswerSet, AnswerValue, Assessment, AssessmentSubmission, Domain, Gender, Patient, QuestionId,
    RiskLevel,
};
pub use scoring::{domain_rating, domain_ratings, score_risk_level, DomainRating};
pub use store::{
    AgeDistribution, DashboardSummary, PatientFilter, RiskDistribution, Store, StoreError,
};
