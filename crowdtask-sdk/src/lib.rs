//! crowdtask SDK
//!
//! A client for the marketplace requester API built on `aws-sdk-mturk`.
//! [`MarketplaceClient`] implements [`crowdtask_core::MarketplaceRequester`],
//! so tasks, HITs and assignments from `crowdtask-core` can be uploaded and
//! reviewed through it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use crowdtask_core::{AnswerField, AnswerSchema, Assignment, HitTemplate, Schema, Task, TaskTemplate};
//! use crowdtask_sdk::{MarketplaceClient, SdkConfig};
//! use std::collections::BTreeMap;
//!
//! struct ImageCategorization;
//!
//! impl TaskTemplate for ImageCategorization {
//!     fn template() -> HitTemplate {
//!         HitTemplate::new()
//!             .with_layout_id("3MCDHXBQ4Z7SJ2ZT2XZACNE142JWKX")
//!             .with_reward("0.25".parse().unwrap())
//!             .with_title("Categorize an image")
//!             .with_description("Pick the category that fits best.")
//!     }
//! }
//!
//! struct ImageAnswers;
//!
//! impl AnswerSchema for ImageAnswers {
//!     fn schema() -> Schema {
//!         Schema::new().field("category", AnswerField::text("Category"))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketplaceClient::new(SdkConfig::sandbox("access-key", "secret-key")).await?;
//!
//!     let params = BTreeMap::from([
//!         ("image_url".to_string(), "https://example.com/cat.png".to_string()),
//!         ("batch_id".to_string(), "2024-06-run".to_string()),
//!     ]);
//!     Task::create_and_upload::<ImageCategorization, _>(&client, params).await?;
//!
//!     for raw in client.hits().list().await? {
//!         if let Some(hit_id) = raw.hit_id {
//!             let results = Assignment::<ImageAnswers>::get_by_hit_id(&client, &hit_id.into()).await?;
//!             for result in results {
//!                 println!("{:?}", result.text("category"));
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod question_form;
pub mod resources;

// Re-export main types for convenience
pub use crate::client::ServiceClient;
pub use crate::config::{Credentials, Endpoint, SdkConfig, SdkConfigBuilder};
pub use crate::error::{SdkError, SdkResult};
pub use crate::resources::assignments::{raw_assignment, AssignmentsClient};
pub use crate::resources::hits::{raw_hit, HitsClient};

use async_trait::async_trait;
use crowdtask_core::{
    AssignmentId, CreateHitRequest, HitId, MarketplaceRequester, RawAssignment, RawHit,
};
use std::sync::Arc;

/// The main client for the marketplace requester API.
///
/// Resource clients share one service client.
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    service: Arc<ServiceClient>,
    hits: HitsClient,
    assignments: AssignmentsClient,
}

impl MarketplaceClient {
    /// Create a new client with the given configuration.
    pub async fn new(config: SdkConfig) -> SdkResult<Self> {
        let service = Arc::new(ServiceClient::connect(config).await?);

        Ok(Self {
            hits: HitsClient::new(Arc::clone(&service)),
            assignments: AssignmentsClient::new(Arc::clone(&service)),
            service,
        })
    }

    /// Create a client from `CROWDTASK_*` environment variables.
    pub async fn from_env() -> SdkResult<Self> {
        Self::new(SdkConfig::from_env()?).await
    }

    /// Create a new client using a builder pattern.
    ///
    /// ```rust,no_run
    /// use crowdtask_sdk::{Credentials, Endpoint, MarketplaceClient};
    /// use std::time::Duration;
    ///
    /// # async fn run() -> Result<(), crowdtask_sdk::SdkError> {
    /// let client = MarketplaceClient::builder(Endpoint::Sandbox)
    ///     .with_credentials(Credentials::new("access-key", "secret-key"))
    ///     .with_timeout(Duration::from_secs(30))
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(endpoint: Endpoint) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    pub fn hits(&self) -> &HitsClient {
        &self.hits
    }

    pub fn assignments(&self) -> &AssignmentsClient {
        &self.assignments
    }

    /// Get a reference to the underlying service client.
    ///
    /// Useful for operations the resource clients do not cover.
    pub fn service_client(&self) -> &ServiceClient {
        &self.service
    }

    pub fn endpoint(&self) -> &str {
        self.service.config().endpoint.url()
    }
}

#[async_trait]
impl MarketplaceRequester for MarketplaceClient {
    type Error = SdkError;

    async fn create_hit(&self, request: CreateHitRequest) -> SdkResult<RawHit> {
        self.hits.create(request).await
    }

    async fn list_hits(&self) -> SdkResult<Vec<RawHit>> {
        self.hits.list().await
    }

    async fn list_reviewable_hits(&self) -> SdkResult<Vec<RawHit>> {
        self.hits.list_reviewable().await
    }

    async fn delete_hit(&self, hit_id: HitId) -> SdkResult<()> {
        self.hits.delete(&hit_id).await
    }

    async fn list_assignments_for_hit(&self, hit_id: HitId) -> SdkResult<Vec<RawAssignment>> {
        self.assignments.list_for_hit(&hit_id).await
    }

    async fn approve_assignment(
        &self,
        assignment_id: AssignmentId,
        message: String,
    ) -> SdkResult<()> {
        self.assignments.approve(&assignment_id, &message).await
    }

    async fn reject_assignment(
        &self,
        assignment_id: AssignmentId,
        message: String,
    ) -> SdkResult<()> {
        self.assignments.reject(&assignment_id, &message).await
    }
}

/// Builder for creating a MarketplaceClient with fluent configuration.
#[derive(Debug)]
pub struct ClientBuilder {
    config_builder: SdkConfigBuilder,
}

impl ClientBuilder {
    /// Create a new client builder for the given endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            config_builder: SdkConfig::builder(endpoint),
        }
    }

    /// Set the signing credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.config_builder = self.config_builder.with_credentials(credentials);
        self
    }

    /// Set the signing region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.with_region(region);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.with_timeout(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.with_connect_timeout(timeout);
        self
    }

    /// Enable or disable request/response logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.config_builder = self.config_builder.with_logging(enable);
        self
    }

    /// Add a custom header to all requests.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.with_header(name, value);
        self
    }

    /// Build the client.
    pub async fn build(self) -> SdkResult<MarketplaceClient> {
        let config = self.config_builder.build();
        MarketplaceClient::new(config).await
    }
}
