//! HITs resource client
//!
//! Creating, listing and deleting work items.

use crate::client::ServiceClient;
use crate::error::{SdkError, SdkResult};
use crate::resources::{seconds, MAX_RESULTS};
use aws_sdk_mturk::types::{Hit, HitLayoutParameter, ReviewableHitStatus};
use crowdtask_core::{CreateHitRequest, HitId, LayoutParameter, RawHit};
use std::sync::Arc;
use tracing::{debug, warn};

/// The only currency rewards are paid in
const REWARD_CURRENCY: &str = "USD";

/// Client for HIT operations
#[derive(Debug, Clone)]
pub struct HitsClient {
    client: Arc<ServiceClient>,
}

/// Copy the fields the core reads from a service HIT.
pub fn raw_hit(hit: &Hit) -> RawHit {
    RawHit {
        hit_id: hit.hit_id().map(str::to_string),
        hit_type_id: hit.hit_type_id().map(str::to_string),
        hit_layout_id: hit.hit_layout_id().map(str::to_string),
        title: hit.title().map(str::to_string),
        status: hit.hit_status().map(|status| status.as_str().to_string()),
        requester_annotation: hit.requester_annotation().map(str::to_string),
    }
}

/// Layout parameters in the order they were given.
pub fn layout_parameters(params: &[LayoutParameter]) -> SdkResult<Vec<HitLayoutParameter>> {
    params
        .iter()
        .map(|param| {
            HitLayoutParameter::builder()
                .name(&param.name)
                .value(&param.value)
                .build()
                .map_err(|e| SdkError::InvalidRequest(e.to_string()))
        })
        .collect()
}

impl HitsClient {
    /// Create a new HITs client
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }

    /// Create a HIT from a layout
    pub async fn create(&self, request: CreateHitRequest) -> SdkResult<RawHit> {
        if request.reward.currency_code != REWARD_CURRENCY {
            warn!(
                currency = %request.reward.currency_code,
                "Rewards are paid in {}; currency code is not sent", REWARD_CURRENCY
            );
        }

        let max_assignments = i32::try_from(request.max_assignments).map_err(|_| {
            SdkError::InvalidRequest(format!(
                "max assignments out of range: {}",
                request.max_assignments
            ))
        })?;

        let output = self
            .client
            .inner()
            .create_hit()
            .hit_layout_id(&request.layout_id)
            .set_hit_layout_parameters(Some(layout_parameters(&request.layout_params)?))
            .reward(request.reward.amount.to_string())
            .title(&request.title)
            .description(&request.description)
            .set_keywords(request.keywords.clone())
            .max_assignments(max_assignments)
            .lifetime_in_seconds(seconds(request.lifetime))
            .assignment_duration_in_seconds(seconds(request.duration))
            .auto_approval_delay_in_seconds(seconds(request.approval_delay))
            .set_requester_annotation(request.annotation.clone())
            .send()
            .await?;

        if self.client.config().enable_logging {
            debug!(?output, "CreateHIT response");
        }

        output
            .hit()
            .map(raw_hit)
            .ok_or_else(|| SdkError::Transport("CreateHIT returned no HIT".to_string()))
    }

    /// All HITs of the account
    pub async fn list(&self) -> SdkResult<Vec<RawHit>> {
        let mut hits = Vec::new();
        let mut next_token = None;

        loop {
            let page = self
                .client
                .inner()
                .list_hits()
                .max_results(MAX_RESULTS)
                .set_next_token(next_token.take())
                .send()
                .await?;
            debug!(count = page.hits().len(), "Fetched HIT page");

            hits.extend(page.hits().iter().map(raw_hit));

            match page.next_token() {
                Some(token) if !page.hits().is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(hits)
    }

    /// HITs with submitted assignments awaiting review
    pub async fn list_reviewable(&self) -> SdkResult<Vec<RawHit>> {
        let mut hits = Vec::new();
        let mut next_token = None;

        loop {
            let page = self
                .client
                .inner()
                .list_reviewable_hits()
                .status(ReviewableHitStatus::Reviewable)
                .max_results(MAX_RESULTS)
                .set_next_token(next_token.take())
                .send()
                .await?;
            debug!(count = page.hits().len(), "Fetched reviewable HIT page");

            hits.extend(page.hits().iter().map(raw_hit));

            match page.next_token() {
                Some(token) if !page.hits().is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(hits)
    }

    /// Delete a HIT
    pub async fn delete(&self, hit_id: &HitId) -> SdkResult<()> {
        self.client
            .inner()
            .delete_hit()
            .hit_id(hit_id.as_str())
            .send()
            .await?;
        Ok(())
    }
}
