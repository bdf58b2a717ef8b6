#![allow(dead_code)]

use async_trait::async_trait;
use crowdtask_core::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

mockall::mock! {
    pub Requester {}

    #[async_trait]
    impl MarketplaceRequester for Requester {
        type Error = CoreError;

        async fn create_hit(&self, request: CreateHitRequest) -> std::result::Result<RawHit, CoreError>;
        async fn list_hits(&self) -> std::result::Result<Vec<RawHit>, CoreError>;
        async fn list_reviewable_hits(&self) -> std::result::Result<Vec<RawHit>, CoreError>;
        async fn delete_hit(&self, hit_id: HitId) -> std::result::Result<(), CoreError>;
        async fn list_assignments_for_hit(&self, hit_id: HitId) -> std::result::Result<Vec<RawAssignment>, CoreError>;
        async fn approve_assignment(&self, assignment_id: AssignmentId, message: String) -> std::result::Result<(), CoreError>;
        async fn reject_assignment(&self, assignment_id: AssignmentId, message: String) -> std::result::Result<(), CoreError>;
    }
}

/// Image categorization task used across tests.
pub struct CategorizationTask;

impl TaskTemplate for CategorizationTask {
    fn template() -> HitTemplate {
        HitTemplate::new()
            .with_layout_id("3MCDHXBQ4Z7SJ2ZT2XZACNE142JWKX")
            .with_reward(Decimal::from_str("0.02").unwrap())
            .with_title("Categorize An Image")
            .with_description("Categorize this rad image.")
            .with_keywords(["image", "categorize"])
    }
}

/// Answers to a person-description form.
#[derive(Debug, Clone)]
pub struct PersonReview;

impl AnswerSchema for PersonReview {
    fn schema() -> Schema {
        Schema::new()
            .field("age", AnswerField::text("Age"))
            .field("categories", AnswerField::multi_choice("Categories"))
            .field("is_old", AnswerField::boolean("IsOld").with_default(true))
    }
}

pub fn image_params() -> BTreeMap<String, String> {
    BTreeMap::from([("image_url".to_string(), "http://herp.com/derp".to_string())])
}

pub fn make_task() -> Task {
    Task::from_template::<CategorizationTask>(image_params())
}

pub fn raw_assignment<'a>(answers: impl IntoIterator<Item = (&'a str, &'a str)>) -> RawAssignment {
    RawAssignment::new("3NQ8ZXSZ1A7BTZKMJ6Z9N3L2V3PXCO", "3XJ0YD2RKV2MGC0ZP6T4W6VLGLPR1E", "A3RKSVVUSPRQ1J")
        .with_answers(answers)
}

pub fn raw_hit(hit_id: &str, batch_id: Option<&str>) -> RawHit {
    let hit = RawHit::new(hit_id);
    match batch_id {
        Some(batch_id) => hit.with_annotation(batch_id),
        None => hit,
    }
}
