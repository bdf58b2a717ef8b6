//! Uploaded work items (HITs)

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ids::{BatchId, HitId};
use crate::error::{CoreError, Result};
use crate::traits::MarketplaceRequester;

/// A HIT as returned by the marketplace. Every attribute may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(rename = "HITId", default, skip_serializing_if = "Option::is_none")]
    pub hit_id: Option<String>,
    #[serde(rename = "HITTypeId", default, skip_serializing_if = "Option::is_none")]
    pub hit_type_id: Option<String>,
    #[serde(rename = "HITLayoutId", default, skip_serializing_if = "Option::is_none")]
    pub hit_layout_id: Option<String>,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "HITStatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        rename = "RequesterAnnotation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub requester_annotation: Option<String>,
}

impl RawHit {
    pub fn new(hit_id: impl Into<String>) -> Self {
        Self {
            hit_id: Some(hit_id.into()),
            ..Default::default()
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.requester_annotation = Some(annotation.into());
        self
    }
}

/// Internal view of a HIT: its id and the batch it was uploaded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub hit_id: Option<HitId>,
    pub batch_id: Option<BatchId>,
}

impl Hit {
    pub fn new(hit_id: Option<HitId>, batch_id: Option<BatchId>) -> Self {
        Self { hit_id, batch_id }
    }

    pub fn from_raw(raw: Option<&RawHit>) -> Result<Self> {
        raw.map(Self::from_wire).ok_or(CoreError::InvalidHit)
    }

    fn from_wire(raw: &RawHit) -> Self {
        Self {
            hit_id: raw.hit_id.clone().map(HitId::from),
            batch_id: raw.requester_annotation.clone().map(BatchId::from),
        }
    }

    /// Delete this HIT from the marketplace. A missing or empty id is an error.
    pub async fn dispose<R: MarketplaceRequester>(
        &self,
        requester: &R,
    ) -> std::result::Result<(), R::Error> {
        let hit_id = self
            .hit_id
            .clone()
            .filter(|id| !id.as_str().is_empty())
            .ok_or(CoreError::MissingHitId)?;
        info!(hit_id = %hit_id, "Disposing HIT");
        requester.delete_hit(hit_id).await
    }

    fn in_batch(&self, batch_id: &BatchId) -> bool {
        self.batch_id.as_ref() == Some(batch_id)
    }
}

pub fn transform_raw_hits(hits: Option<&[RawHit]>) -> Vec<Hit> {
    hits.unwrap_or_default()
        .iter()
        .map(Hit::from_wire)
        .collect()
}

pub async fn get_all<R: MarketplaceRequester>(
    requester: &R,
) -> std::result::Result<Vec<Hit>, R::Error> {
    let raw = requester.list_hits().await?;
    Ok(transform_raw_hits(Some(raw.as_slice())))
}

pub async fn get_all_by_batch_id<R: MarketplaceRequester>(
    requester: &R,
    batch_id: &BatchId,
) -> std::result::Result<Vec<Hit>, R::Error> {
    let hits = get_all(requester).await?;
    Ok(hits.into_iter().filter(|hit| hit.in_batch(batch_id)).collect())
}

pub async fn get_reviewable_by_batch_id<R: MarketplaceRequester>(
    requester: &R,
    batch_id: &BatchId,
) -> std::result::Result<Vec<Hit>, R::Error> {
    let raw = requester.list_reviewable_hits().await?;
    Ok(transform_raw_hits(Some(raw.as_slice()))
        .into_iter()
        .filter(|hit| hit.in_batch(batch_id))
        .collect())
}
