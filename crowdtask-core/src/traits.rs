use async_trait::async_trait;

use crate::domain::assignment::RawAssignment;
use crate::domain::hit::RawHit;
use crate::domain::ids::{AssignmentId, HitId};
use crate::domain::task::CreateHitRequest;
use crate::error::CoreError;

/// Remote operations of the marketplace requester API.
///
/// Implementations perform the network calls; errors are returned to the
/// caller untouched. Core failures raised around a call (validation,
/// decoding) are converted into the implementation's error type.
#[async_trait]
pub trait MarketplaceRequester: Send + Sync {
    type Error: std::error::Error + From<CoreError> + Send + Sync + 'static;

    async fn create_hit(&self, request: CreateHitRequest) -> Result<RawHit, Self::Error>;

    async fn list_hits(&self) -> Result<Vec<RawHit>, Self::Error>;

    async fn list_reviewable_hits(&self) -> Result<Vec<RawHit>, Self::Error>;

    async fn delete_hit(&self, hit_id: HitId) -> Result<(), Self::Error>;

    async fn list_assignments_for_hit(
        &self,
        hit_id: HitId,
    ) -> Result<Vec<RawAssignment>, Self::Error>;

    async fn approve_assignment(
        &self,
        assignment_id: AssignmentId,
        message: String,
    ) -> Result<(), Self::Error>;

    async fn reject_assignment(
        &self,
        assignment_id: AssignmentId,
        message: String,
    ) -> Result<(), Self::Error>;
}
