mod common;

use common::*;
use crowdtask_core::*;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use std::collections::{BTreeSet, HashMap};

struct NoAnswers;

impl AnswerSchema for NoAnswers {
    fn schema() -> Schema {
        Schema::new()
    }
}

// ===== Schema mapping =====

#[test]
fn test_mapping_is_empty_for_schema_without_answers() {
    assert_eq!(build_schema_mapping::<NoAnswers>(), HashMap::new());
}

#[test]
fn test_mapping_has_question_names() {
    let mapping = build_schema_mapping::<PersonReview>();
    let questions: BTreeSet<&str> = mapping.keys().map(String::as_str).collect();
    assert_eq!(questions, BTreeSet::from(["Age", "Categories", "IsOld"]));
}

#[test]
fn test_mapping_points_to_attribute_names() {
    let mapping = build_schema_mapping::<PersonReview>();
    assert_eq!(mapping["Age"], "age");
    assert_eq!(mapping["IsOld"], "is_old");
    assert_eq!(mapping["Categories"], "categories");
}

// ===== extract_answer =====

fn answered() -> RawAssignment {
    raw_assignment([("Age", "29"), ("IsOld", "1"), ("Categories", "Front")])
}

#[test]
fn test_extract_returns_none_without_assignment() {
    assert_eq!(extract_answer(None, "Herp"), None);
}

#[test]
fn test_extract_returns_none_when_answers_missing() {
    let mut raw = answered();
    raw.answers = None;
    assert_eq!(extract_answer(Some(&raw), "Herp"), None);
}

#[test]
fn test_extract_returns_none_for_unknown_question() {
    assert_eq!(extract_answer(Some(&answered()), "Herp"), None);
}

#[test]
fn test_extract_returns_answer_to_question() {
    assert_eq!(extract_answer(Some(&answered()), "Age"), Some("29"));
}

#[test]
fn test_extract_returns_none_for_entry_without_fields() {
    let mut raw = answered();
    raw.answers = Some(vec![vec![QuestionFormAnswer::new("Age", vec![])]]);
    assert_eq!(extract_answer(Some(&raw), "Age"), None);
}

#[test]
fn test_extract_first_matching_entry_wins() {
    let mut raw = answered();
    raw.answers = Some(vec![vec![
        QuestionFormAnswer::new("Age", vec!["29".to_string()]),
        QuestionFormAnswer::new("Age", vec!["92".to_string()]),
    ]]);
    assert_eq!(extract_answer(Some(&raw), "Age"), Some("29"));
}

#[test]
fn test_extract_only_reads_first_answer_group() {
    let mut raw = answered();
    raw.answers = Some(vec![
        vec![],
        vec![QuestionFormAnswer::new("Age", vec!["29".to_string()])],
    ]);
    assert_eq!(extract_answer(Some(&raw), "Age"), None);
}

// ===== Decoding =====

fn decoded() -> Assignment<PersonReview> {
    let raw = raw_assignment([("Age", "29"), ("IsOld", "0"), ("Categories", "Front|WaistUp")]);
    Assignment::from_raw(raw).unwrap()
}

#[test]
fn test_decodes_age() {
    assert_eq!(decoded().text("age"), Some("29".to_string()));
}

#[test]
fn test_decodes_is_old() {
    assert_eq!(decoded().boolean("is_old"), Some(false));
}

#[test]
fn test_decodes_categories() {
    assert_eq!(
        decoded().choices("categories"),
        vec!["Front".to_string(), "WaistUp".to_string()]
    );
}

#[test]
fn test_exposes_identifiers() {
    let assignment = decoded();
    assert_eq!(assignment.assignment_id().as_str(), "3NQ8ZXSZ1A7BTZKMJ6Z9N3L2V3PXCO");
    assert_eq!(assignment.hit_id().as_str(), "3XJ0YD2RKV2MGC0ZP6T4W6VLGLPR1E");
    assert_eq!(assignment.worker_id().as_str(), "A3RKSVVUSPRQ1J");
}

#[test]
fn test_missing_answers_fall_back_to_defaults() {
    let assignment = Assignment::<PersonReview>::from_raw(raw_assignment(Vec::<(&str, &str)>::new())).unwrap();

    assert_eq!(assignment.text("age"), None);
    assert_eq!(assignment.boolean("is_old"), Some(true));
    assert_eq!(assignment.choices("categories"), Vec::<String>::new());
}

#[test]
fn test_decode_result_with_explicit_mapping() {
    let raw = raw_assignment([("Age", "41")]);
    let mapping = HashMap::from([("Age".to_string(), "age".to_string())]);
    let sheet = decode_result(&raw, PersonReview::schema(), &mapping).unwrap();

    assert_eq!(sheet.text("age"), Some("41".to_string()));
    assert!(sheet.is_unset("is_old"));
}

#[test]
fn test_decode_propagates_coercion_errors() {
    #[derive(Debug)]
    struct Survey;

    impl AnswerSchema for Survey {
        fn schema() -> Schema {
            Schema::new().field("count", AnswerField::integer("Count"))
        }
    }

    let err = Assignment::<Survey>::from_raw(raw_assignment([("Count", "many")])).unwrap_err();
    assert!(matches!(err, CoreError::Coercion { .. }));
}

#[test]
fn test_explicit_set_after_decoding() {
    let mut assignment = decoded();
    assignment.set("is_old", "1").unwrap();
    assert_eq!(assignment.boolean("is_old"), Some(true));
}

// ===== Requester round trips =====

#[tokio::test]
async fn test_get_by_hit_id_decodes_every_assignment() {
    let mut requester = MockRequester::new();
    requester
        .expect_list_assignments_for_hit()
        .with(eq(HitId::new("HIT1")))
        .times(1)
        .returning(|_| {
            Ok(vec![
                raw_assignment([("Age", "29")]),
                raw_assignment([("Age", "63"), ("IsOld", "1")]),
            ])
        });

    let assignments = Assignment::<PersonReview>::get_by_hit_id(&requester, &HitId::new("HIT1"))
        .await
        .unwrap();

    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0].text("age"), Some("29".to_string()));
    assert_eq!(assignments[1].boolean("is_old"), Some(true));
}

#[tokio::test]
async fn test_approve_sends_assignment_id_and_message() {
    let mut requester = MockRequester::new();
    requester
        .expect_approve_assignment()
        .with(
            eq(AssignmentId::new("3NQ8ZXSZ1A7BTZKMJ6Z9N3L2V3PXCO")),
            eq("Great work".to_string()),
        )
        .times(1)
        .returning(|_, _| Ok(()));

    decoded().approve(&requester, "Great work").await.unwrap();
}

#[tokio::test]
async fn test_reject_sends_assignment_id_and_message() {
    let mut requester = MockRequester::new();
    requester
        .expect_reject_assignment()
        .with(
            eq(AssignmentId::new("3NQ8ZXSZ1A7BTZKMJ6Z9N3L2V3PXCO")),
            eq("Answers were blank".to_string()),
        )
        .times(1)
        .returning(|_, _| Ok(()));

    decoded().reject(&requester, "Answers were blank").await.unwrap();
}
