//! Service client construction
//!
//! Shared settings are loaded through `aws-config`, then the marketplace
//! client is pinned to the configured endpoint. Calls are made once;
//! failures are returned to the caller.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_mturk::config::interceptors::BeforeTransmitInterceptorContextMut;
use aws_sdk_mturk::config::retry::RetryConfig;
use aws_sdk_mturk::config::timeout::TimeoutConfig;
use aws_sdk_mturk::config::{ConfigBag, Intercept, RuntimeComponents};
use aws_sdk_mturk::error::BoxError;
use aws_sdk_mturk::Client;
use tracing::info;

use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};

/// Provider name recorded on credentials taken from [`SdkConfig`]
const PROVIDER_NAME: &str = "crowdtask-config";

/// Adds the configured custom headers to every request before signing.
#[derive(Debug)]
struct CustomHeaders(Vec<(String, String)>);

impl Intercept for CustomHeaders {
    fn name(&self) -> &'static str {
        "CustomHeaders"
    }

    fn modify_before_signing(
        &self,
        context: &mut BeforeTransmitInterceptorContextMut<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        let headers = context.request_mut().headers_mut();
        for (name, value) in &self.0 {
            headers.try_insert(name.clone(), value.clone())?;
        }
        Ok(())
    }
}

/// The marketplace service client shared by the resource clients
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    config: Arc<SdkConfig>,
}

impl ServiceClient {
    /// Resolve shared settings and build the service client.
    ///
    /// Credentials are resolved once here so a missing key pair fails early
    /// with [`SdkError::NotConfigured`].
    pub async fn connect(config: SdkConfig) -> SdkResult<Self> {
        config.validate()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(credentials) = &config.credentials {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                &credentials.access_key_id,
                &credentials.secret_access_key,
                credentials.session_token.clone(),
                None,
                PROVIDER_NAME,
            ));
        }

        let shared = loader.load().await;

        let provider = shared.credentials_provider().ok_or_else(|| {
            SdkError::NotConfigured("no credentials provider available".to_string())
        })?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| SdkError::NotConfigured(e.to_string()))?;

        let timeouts = TimeoutConfig::builder()
            .operation_attempt_timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build();

        let mut builder = aws_sdk_mturk::config::Builder::from(&shared)
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeouts);

        if let Some(url) = config.endpoint.override_url() {
            builder = builder.endpoint_url(url);
        }

        if !config.custom_headers.is_empty() {
            builder = builder.interceptor(CustomHeaders(config.custom_headers.clone()));
        }

        let client = Client::from_conf(builder.build());

        info!(
            endpoint = config.endpoint.url(),
            region = %config.region,
            "Marketplace client created"
        );

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// The underlying service client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }
}
