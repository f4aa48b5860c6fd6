//! Integration tests for the record store: upsert semantics, filtering,
//! history, snapshot round-trips, and on-disk persistence.

use sen_screen_core::models::{
    AnswerSet, AnswerValue, AssessmentSubmission, Gender, RiskLevel,
};
use sen_screen_core::store::{PatientFilter, Store, StoreError};
use sen_screen_core::SnapshotError;

fn make_submission(name: &str, phone: &str, age: u32) -> AssessmentSubmission {
    AssessmentSubmission {
        assessment_date: "2024-03-01".into(),
        child_name: name.into(),
        child_age: age,
        child_gender: Gender::Male,
        parent_name: Some("Parent".into()),
        parent_phone: phone.into(),
        answers: AnswerSet::uniform(AnswerValue::Good),
        additional_notes: None,
    }
}

#[test]
fn test_submit_creates_patient_and_assessment() {
    let mut store = Store::open_in_memory().unwrap();

    let (assessment, patient) = store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();

    assert_eq!(assessment.child_name, "Ka Ming");
    assert_eq!(assessment.risk_level, RiskLevel::Low);
    assert_eq!(patient.name, "Ka Ming");
    assert_eq!(patient.phone, "91234567");
    assert_eq!(patient.risk_level, RiskLevel::Low);
    assert_eq!(patient.last_assessment, assessment.timestamp);

    assert_eq!(store.patients().len(), 1);
    assert_eq!(store.assessments().len(), 1);
}

#[test]
fn test_repeat_submission_upserts_by_name_and_phone() {
    let mut store = Store::open_in_memory().unwrap();

    let (_, first) = store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();

    // Same (name, phone), different age and answers
    let mut second_submission = make_submission("Ka Ming", "91234567", 6);
    second_submission.answers = AnswerSet::uniform(AnswerValue::Poor);
    let (_, second) = store.submit_assessment(second_submission).unwrap();

    // Exactly one patient, updated in place
    assert_eq!(store.patients().len(), 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.age, 6);
    assert_eq!(second.risk_level, RiskLevel::High);
    assert_eq!(second.created_at, first.created_at);

    // History holds both assessments, in submission order
    let history = store.get_patient_history(&first.id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].child_age, 5);
    assert_eq!(history[1].child_age, 6);
}

#[test]
fn test_distinct_pairs_create_distinct_patients() {
    let mut store = Store::open_in_memory().unwrap();

    store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();
    assert_eq!(store.patients().len(), 1);

    // Same name, different phone → new patient
    store
        .submit_assessment(make_submission("Ka Ming", "61234567", 5))
        .unwrap();
    assert_eq!(store.patients().len(), 2);

    // Same phone, different name → new patient
    store
        .submit_assessment(make_submission("Siu Ling", "91234567", 4))
        .unwrap();
    assert_eq!(store.patients().len(), 3);

    // Existing pair → count unchanged
    store
        .submit_assessment(make_submission("Siu Ling", "91234567", 4))
        .unwrap();
    assert_eq!(store.patients().len(), 3);
}

#[test]
fn test_history_follows_tuple_not_id() {
    let mut store = Store::open_in_memory().unwrap();

    let (_, patient_a) = store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();
    store
        .submit_assessment(make_submission("Siu Ling", "98765432", 4))
        .unwrap();
    store
        .submit_assessment(make_submission("Ka Ming", "91234567", 6))
        .unwrap();

    let history = store.get_patient_history(&patient_a.id);
    assert_eq!(history.len(), 2);
    assert!(history
        .iter()
        .all(|a| a.child_name == "Ka Ming" && a.parent_phone == "91234567"));
}

#[test]
fn test_list_patients_text_query_matches_phone() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();
    store
        .submit_assessment(make_submission("Siu Ling", "68887777", 4))
        .unwrap();

    let filter = PatientFilter {
        text_query: Some("912".into()),
        risk_level: None,
    };
    let matched = store.list_patients(&filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Ka Ming");
}

#[test]
fn test_export_import_round_trip() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();
    let mut poor = make_submission("Siu Ling", "68887777", 4);
    poor.answers = AnswerSet::uniform(AnswerValue::Poor);
    poor.additional_notes = Some("referred by kindergarten".into());
    store.submit_assessment(poor).unwrap();

    let before_patients = serde_json::to_string(store.patients()).unwrap();
    let before_assessments = serde_json::to_string(store.assessments()).unwrap();

    let exported = store.export_snapshot().to_json().unwrap();
    store.import_snapshot(&exported).unwrap();

    assert_eq!(
        serde_json::to_string(store.patients()).unwrap(),
        before_patients
    );
    assert_eq!(
        serde_json::to_string(store.assessments()).unwrap(),
        before_assessments
    );
}

#[test]
fn test_import_empty_collections_clears_store() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();

    store
        .import_snapshot(r#"{"patients": [], "assessments": []}"#)
        .unwrap();

    assert!(store.patients().is_empty());
    assert!(store.assessments().is_empty());
}

#[test]
fn test_import_missing_fields_leaves_store_untouched() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();

    let err = store.import_snapshot(r#"{"foo": 1}"#).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Snapshot(SnapshotError::MissingCollections)
    ));

    assert_eq!(store.patients().len(), 1);
    assert_eq!(store.assessments().len(), 1);
}

#[test]
fn test_import_invalid_json_leaves_store_untouched() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();

    let err = store.import_snapshot("{truncated").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Snapshot(SnapshotError::Parse(_))
    ));

    assert_eq!(store.patients().len(), 1);
}

#[test]
fn test_import_replaces_collections_wholesale() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .submit_assessment(make_submission("Ka Ming", "91234567", 5))
        .unwrap();

    let mut other = Store::open_in_memory().unwrap();
    other
        .submit_assessment(make_submission("Siu Ling", "68887777", 4))
        .unwrap();
    other
        .submit_assessment(make_submission("Wing Yan", "55556666", 7))
        .unwrap();
    let exported = other.export_snapshot().to_json().unwrap();

    store.import_snapshot(&exported).unwrap();

    assert_eq!(store.patients().len(), 2);
    assert_eq!(store.assessments().len(), 2);
    assert!(store
        .list_patients(&PatientFilter {
            text_query: Some("ka ming".into()),
            risk_level: None,
        })
        .is_empty());
}

#[test]
fn test_persistence_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sen-screen.db");

    let patient_id = {
        let mut store = Store::open(&path).unwrap();
        let (_, patient) = store
            .submit_assessment(make_submission("Ka Ming", "91234567", 5))
            .unwrap();
        store
            .submit_assessment(make_submission("Ka Ming", "91234567", 6))
            .unwrap();
        patient.id
    };

    let store = Store::open(&path).unwrap();
    assert_eq!(store.patients().len(), 1);
    assert_eq!(store.assessments().len(), 2);

    let patient = &store.patients()[0];
    assert_eq!(patient.id, patient_id);
    assert_eq!(patient.age, 6);
    assert_eq!(store.get_patient_history(&patient_id).len(), 2);
}

#[test]
fn test_import_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sen-screen.db");

    {
        let mut store = Store::open(&path).unwrap();
        store
            .submit_assessment(make_submission("Ka Ming", "91234567", 5))
            .unwrap();
        store
            .import_snapshot(r#"{"patients": [], "assessments": []}"#)
            .unwrap();
    }

    let store = Store::open(&path).unwrap();
    assert!(store.patients().is_empty());
    assert!(store.assessments().is_empty());
}
