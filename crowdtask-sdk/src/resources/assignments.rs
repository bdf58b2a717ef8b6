//! Assignments resource client
//!
//! Listing submitted work and approving or rejecting it.

use crate::client::ServiceClient;
use crate::error::SdkResult;
use crate::question_form::parse_answers;
use crate::resources::MAX_RESULTS;
use aws_sdk_mturk::types::Assignment;
use crowdtask_core::{AssignmentId, HitId, RawAssignment};
use std::sync::Arc;
use tracing::{debug, info};

/// Client for assignment operations
#[derive(Debug, Clone)]
pub struct AssignmentsClient {
    client: Arc<ServiceClient>,
}

/// Convert a service assignment, parsing its answer document into the
/// first answer group.
pub fn raw_assignment(assignment: &Assignment) -> SdkResult<RawAssignment> {
    let mut raw = RawAssignment::new(
        assignment.assignment_id().unwrap_or_default(),
        assignment.hit_id().unwrap_or_default(),
        assignment.worker_id().unwrap_or_default(),
    );
    raw.status = assignment
        .assignment_status()
        .map(|status| status.as_str().to_string());
    raw.answers = match assignment.answer() {
        Some(xml) => Some(vec![parse_answers(xml)?]),
        None => None,
    };
    Ok(raw)
}

impl AssignmentsClient {
    /// Create a new assignments client
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }

    /// Every assignment submitted for a HIT, answers parsed
    pub async fn list_for_hit(&self, hit_id: &HitId) -> SdkResult<Vec<RawAssignment>> {
        let mut assignments = Vec::new();
        let mut next_token = None;

        loop {
            let page = self
                .client
                .inner()
                .list_assignments_for_hit()
                .hit_id(hit_id.as_str())
                .max_results(MAX_RESULTS)
                .set_next_token(next_token.take())
                .send()
                .await?;
            debug!(hit_id = %hit_id, count = page.assignments().len(), "Fetched assignment page");

            for assignment in page.assignments() {
                assignments.push(raw_assignment(assignment)?);
            }

            match page.next_token() {
                Some(token) if !page.assignments().is_empty() => {
                    next_token = Some(token.to_string())
                }
                _ => break,
            }
        }

        Ok(assignments)
    }

    /// Approve an assignment, paying the worker
    pub async fn approve(&self, assignment_id: &AssignmentId, feedback: &str) -> SdkResult<()> {
        self.client
            .inner()
            .approve_assignment()
            .assignment_id(assignment_id.as_str())
            .requester_feedback(feedback)
            .send()
            .await?;
        info!(assignment_id = %assignment_id, "Assignment approved");
        Ok(())
    }

    /// Reject an assignment
    pub async fn reject(&self, assignment_id: &AssignmentId, feedback: &str) -> SdkResult<()> {
        self.client
            .inner()
            .reject_assignment()
            .assignment_id(assignment_id.as_str())
            .requester_feedback(feedback)
            .send()
            .await?;
        info!(assignment_id = %assignment_id, "Assignment rejected");
        Ok(())
    }
}
