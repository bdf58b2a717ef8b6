//! Submitted assignments
//!
//! Decodes raw worker submissions into typed answers through an
//! [`AnswerSchema`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::marker::PhantomData;
use tracing::debug;

use crate::domain::answer::AnswerValue;
use crate::domain::ids::{AssignmentId, HitId, WorkerId};
use crate::domain::schema::{AnswerSchema, AnswerSheet, Schema};
use crate::error::Result;
use crate::traits::MarketplaceRequester;

/// One answered question inside a raw assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFormAnswer {
    pub qid: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl QuestionFormAnswer {
    pub fn new(qid: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            qid: qid.into(),
            fields,
        }
    }
}

/// An assignment as returned by the marketplace, answers still untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAssignment {
    pub assignment_id: AssignmentId,
    pub hit_id: HitId,
    pub worker_id: WorkerId,
    #[serde(default)]
    pub status: Option<String>,
    /// Answer groups; only the first group carries question answers.
    #[serde(default)]
    pub answers: Option<Vec<Vec<QuestionFormAnswer>>>,
}

impl RawAssignment {
    pub fn new(
        assignment_id: impl Into<AssignmentId>,
        hit_id: impl Into<HitId>,
        worker_id: impl Into<WorkerId>,
    ) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            hit_id: hit_id.into(),
            worker_id: worker_id.into(),
            status: None,
            answers: None,
        }
    }

    /// Attach a single answer group built from `(question, answer)` pairs.
    pub fn with_answers<Q, A>(mut self, answers: impl IntoIterator<Item = (Q, A)>) -> Self
    where
        Q: Into<String>,
        A: Into<String>,
    {
        let group = answers
            .into_iter()
            .map(|(qid, value)| QuestionFormAnswer::new(qid, vec![value.into()]))
            .collect();
        self.answers = Some(vec![group]);
        self
    }
}

/// Answer to `question_name`, or `None` when the payload, its answers or the
/// question are missing. The first matching entry wins.
pub fn extract_answer<'a>(
    assignment: Option<&'a RawAssignment>,
    question_name: &str,
) -> Option<&'a str> {
    let answers = assignment?.answers.as_ref()?;
    let group = answers.first()?;

    group
        .iter()
        .find(|entry| entry.qid == question_name)
        .and_then(|entry| entry.fields.first())
        .map(String::as_str)
}

/// Fill a sheet for `schema` from a raw assignment. Every mapped question is
/// assigned, absent answers included, so defaults apply uniformly.
pub fn decode_result(
    raw: &RawAssignment,
    schema: Schema,
    mapping: &HashMap<String, String>,
) -> Result<AnswerSheet> {
    let mut sheet = AnswerSheet::new(schema);

    for (question_name, attribute) in mapping {
        let answer = extract_answer(Some(raw), question_name);
        sheet.set(attribute, answer)?;
    }

    debug!(
        assignment_id = %raw.assignment_id,
        fields = mapping.len(),
        "Decoded assignment answers"
    );

    Ok(sheet)
}

/// A decoded assignment for schema `S`.
#[derive(Debug, Clone)]
pub struct Assignment<S> {
    raw: RawAssignment,
    question_to_attribute: HashMap<String, String>,
    answers: AnswerSheet,
    _schema: PhantomData<S>,
}

impl<S: AnswerSchema> Assignment<S> {
    pub fn from_raw(raw: RawAssignment) -> Result<Self> {
        let schema = S::schema();
        let question_to_attribute = schema.question_mapping();
        let answers = decode_result(&raw, schema, &question_to_attribute)?;

        Ok(Self {
            raw,
            question_to_attribute,
            answers,
            _schema: PhantomData,
        })
    }

    /// Fetch and decode every assignment submitted for a HIT.
    pub async fn get_by_hit_id<R: MarketplaceRequester>(
        requester: &R,
        hit_id: &HitId,
    ) -> std::result::Result<Vec<Self>, R::Error> {
        let raw_assignments = requester.list_assignments_for_hit(hit_id.clone()).await?;

        raw_assignments
            .into_iter()
            .map(|raw| Self::from_raw(raw).map_err(R::Error::from))
            .collect()
    }
}

impl<S> Assignment<S> {
    pub fn raw(&self) -> &RawAssignment {
        &self.raw
    }

    pub fn assignment_id(&self) -> &AssignmentId {
        &self.raw.assignment_id
    }

    pub fn hit_id(&self) -> &HitId {
        &self.raw.hit_id
    }

    pub fn worker_id(&self) -> &WorkerId {
        &self.raw.worker_id
    }

    pub fn question_to_attribute(&self) -> &HashMap<String, String> {
        &self.question_to_attribute
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Explicit assignment of a field, with the same coercion as decoding.
    pub fn set(
        &mut self,
        attribute: &str,
        input: impl Into<crate::domain::answer::AnswerInput>,
    ) -> Result<()> {
        self.answers.set(attribute, input)
    }

    pub fn get(&self, attribute: &str) -> Option<AnswerValue> {
        self.answers.get(attribute)
    }

    pub fn text(&self, attribute: &str) -> Option<String> {
        self.answers.text(attribute)
    }

    pub fn boolean(&self, attribute: &str) -> Option<bool> {
        self.answers.boolean(attribute)
    }

    pub fn integer(&self, attribute: &str) -> Option<i64> {
        self.answers.integer(attribute)
    }

    pub fn decimal(&self, attribute: &str) -> Option<rust_decimal::Decimal> {
        self.answers.decimal(attribute)
    }

    pub fn choices(&self, attribute: &str) -> Vec<String> {
        self.answers.choices(attribute)
    }

    pub async fn approve<R: MarketplaceRequester>(
        &self,
        requester: &R,
        message: impl Into<String>,
    ) -> std::result::Result<(), R::Error> {
        requester
            .approve_assignment(self.assignment_id().clone(), message.into())
            .await
    }

    pub async fn reject<R: MarketplaceRequester>(
        &self,
        requester: &R,
        message: impl Into<String>,
    ) -> std::result::Result<(), R::Error> {
        requester
            .reject_assignment(self.assignment_id().clone(), message.into())
            .await
    }
}
