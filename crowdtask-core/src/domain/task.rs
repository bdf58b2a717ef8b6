//! Task templates and upload
//!
//! A [`TaskTemplate`] declares the fixed shape of a HIT (layout, reward,
//! title, timing). A [`Task`] pairs a template with the per-item layout
//! parameters shown to workers and knows how to upload itself.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::batch::current_batch_id;
use crate::domain::hit::RawHit;
use crate::domain::ids::BatchId;
use crate::error::{CoreError, Result};
use crate::traits::MarketplaceRequester;

/// Parameter key removed by [`Task::create_and_upload`] and used as the batch id.
pub const BATCH_ID_PARAM: &str = "batch_id";

/// Separator used when sending keywords.
pub const KEYWORD_SEPARATOR: &str = ",";

/// Reward amount with its currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: Decimal,
    pub currency_code: String,
}

impl Price {
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }
}

/// One named value substituted into the HIT layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayoutParameter {
    pub name: String,
    pub value: String,
}

impl LayoutParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Everything the requester needs to create a HIT.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateHitRequest {
    pub layout_id: String,
    pub reward: Price,
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
    pub max_assignments: u32,
    pub lifetime: Duration,
    pub duration: Duration,
    pub approval_delay: Duration,
    pub annotation: Option<String>,
    pub layout_params: Vec<LayoutParameter>,
}

/// Fixed settings shared by every task of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTemplate {
    /// Layout id from the requester site; changes each time the layout is saved.
    pub layout_id: Option<String>,
    /// Reward per completed assignment, e.g. `0.25`.
    pub reward: Option<Decimal>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    /// Number of workers asked to complete each HIT.
    pub assignments_per_hit: u32,
    /// How long after upload the HIT stays available.
    pub hit_expires_in: Duration,
    /// Time each worker has to complete an assignment.
    pub time_per_assignment: Duration,
    /// Time before submitted assignments are approved automatically.
    pub auto_approval_delay: Duration,
    pub currency_code: String,
}

impl Default for HitTemplate {
    fn default() -> Self {
        Self {
            layout_id: None,
            reward: None,
            title: None,
            description: None,
            keywords: None,
            assignments_per_hit: 1,
            hit_expires_in: Duration::from_secs(7 * 24 * 60 * 60),
            time_per_assignment: Duration::from_secs(60 * 60),
            auto_approval_delay: Duration::from_secs(8 * 60 * 60),
            currency_code: "USD".to_string(),
        }
    }
}

impl HitTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_id(mut self, layout_id: impl Into<String>) -> Self {
        self.layout_id = Some(layout_id.into());
        self
    }

    pub fn with_reward(mut self, reward: Decimal) -> Self {
        self.reward = Some(reward);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keywords<K, I>(mut self, keywords: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_assignments_per_hit(mut self, assignments: u32) -> Self {
        self.assignments_per_hit = assignments;
        self
    }

    pub fn with_hit_expires_in(mut self, expires_in: Duration) -> Self {
        self.hit_expires_in = expires_in;
        self
    }

    pub fn with_time_per_assignment(mut self, time: Duration) -> Self {
        self.time_per_assignment = time;
        self
    }

    pub fn with_auto_approval_delay(mut self, delay: Duration) -> Self {
        self.auto_approval_delay = delay;
        self
    }

    pub fn with_currency_code(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = currency_code.into();
        self
    }

    /// Fails on the first missing mandatory field, in declaration order.
    pub fn validate(&self) -> Result<()> {
        if self.layout_id.is_none() {
            return Err(CoreError::missing_field("layout_id"));
        }
        if self.reward.is_none() {
            return Err(CoreError::missing_field("reward"));
        }
        if self.title.is_none() {
            return Err(CoreError::missing_field("title"));
        }
        if self.description.is_none() {
            return Err(CoreError::missing_field("description"));
        }
        Ok(())
    }
}

/// Types that declare a HIT template.
pub trait TaskTemplate {
    fn template() -> HitTemplate;
}

/// Comma-joined keywords, or `None` when there are none.
pub fn keywords_from_list(keywords: Option<&[String]>) -> Option<String> {
    match keywords {
        Some(keywords) if !keywords.is_empty() => Some(keywords.join(KEYWORD_SEPARATOR)),
        _ => None,
    }
}

pub fn params_to_layout_parameters(
    params: Option<&BTreeMap<String, String>>,
) -> Vec<LayoutParameter> {
    params
        .map(|params| {
            params
                .iter()
                .map(|(name, value)| LayoutParameter::new(name.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// A single HIT to upload: template plus layout parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    template: HitTemplate,
    params: BTreeMap<String, String>,
}

impl Task {
    pub fn new(template: HitTemplate, params: BTreeMap<String, String>) -> Self {
        Self { template, params }
    }

    pub fn from_template<T: TaskTemplate>(params: BTreeMap<String, String>) -> Self {
        Self::new(T::template(), params)
    }

    pub fn template(&self) -> &HitTemplate {
        &self.template
    }

    pub fn template_mut(&mut self) -> &mut HitTemplate {
        &mut self.template
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn validate(&self) -> Result<()> {
        self.template.validate()
    }

    /// Assemble the create request. `annotation` is sent unchanged.
    pub fn build_request(&self, annotation: Option<BatchId>) -> Result<CreateHitRequest> {
        let template = &self.template;
        let missing = CoreError::missing_field;

        Ok(CreateHitRequest {
            layout_id: template.layout_id.clone().ok_or_else(|| missing("layout_id"))?,
            reward: Price::new(
                template.reward.ok_or_else(|| missing("reward"))?,
                template.currency_code.clone(),
            ),
            title: template.title.clone().ok_or_else(|| missing("title"))?,
            description: template
                .description
                .clone()
                .ok_or_else(|| missing("description"))?,
            keywords: keywords_from_list(template.keywords.as_deref()),
            max_assignments: template.assignments_per_hit,
            lifetime: template.hit_expires_in,
            duration: template.time_per_assignment,
            approval_delay: template.auto_approval_delay,
            annotation: annotation.map(String::from),
            layout_params: params_to_layout_parameters(Some(&self.params)),
        })
    }

    /// Validate and upload. Without a non-empty `batch_id` the ambient batch
    /// (see [`crate::domain::batch::with_batch`]) is used.
    pub async fn upload<R: MarketplaceRequester>(
        &self,
        requester: &R,
        batch_id: Option<BatchId>,
    ) -> std::result::Result<RawHit, R::Error> {
        self.validate()?;

        let annotation = batch_id
            .filter(|id| !id.is_empty())
            .or_else(current_batch_id);
        debug!(annotation = ?annotation, "Resolved batch for upload");

        let request = self.build_request(annotation)?;
        info!(
            layout_id = %request.layout_id,
            title = %request.title,
            params = request.layout_params.len(),
            "Uploading task"
        );

        requester.create_hit(request).await
    }

    /// Build a task from `T` and upload it. A `batch_id` entry in `params` is
    /// removed and used as the batch id.
    pub async fn create_and_upload<T, R>(
        requester: &R,
        mut params: BTreeMap<String, String>,
    ) -> std::result::Result<Self, R::Error>
    where
        T: TaskTemplate,
        R: MarketplaceRequester,
    {
        let batch_id = params.remove(BATCH_ID_PARAM).map(BatchId::from);
        let task = Self::from_template::<T>(params);
        task.upload(requester, batch_id).await?;
        Ok(task)
    }
}
