//! SDK configuration
//!
//! Endpoint, credentials and transport settings for the marketplace client.
//! Anything left unset here falls back to the AWS shared configuration
//! (`AWS_ACCESS_KEY_ID`, profiles, instance roles).

use std::fmt;
use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::{SdkError, SdkResult};

/// Production requester endpoint
pub const PRODUCTION_ENDPOINT: &str = "https://mturk-requester.us-east-1.amazonaws.com";

/// Sandbox requester endpoint, for trying tasks without paying workers
pub const SANDBOX_ENDPOINT: &str = "https://mturk-requester-sandbox.us-east-1.amazonaws.com";

/// The only region the marketplace is served from
pub const DEFAULT_REGION: &str = "us-east-1";

/// Prefix of the environment variables read by [`SdkConfig::from_env`]
pub const ENV_PREFIX: &str = "CROWDTASK";

/// Where requests are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Production,
    Sandbox,
    Custom(String),
}

impl Endpoint {
    pub fn url(&self) -> &str {
        match self {
            Endpoint::Production => PRODUCTION_ENDPOINT,
            Endpoint::Sandbox => SANDBOX_ENDPOINT,
            Endpoint::Custom(url) => url,
        }
    }

    /// URL to pin on the service client; production uses the resolved default.
    pub fn override_url(&self) -> Option<&str> {
        match self {
            Endpoint::Production => None,
            other => Some(other.url()),
        }
    }
}

/// Access key pair used to sign requests
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Session token for temporary credentials
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Configuration for the SDK client
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Marketplace endpoint
    pub endpoint: Endpoint,

    /// Signing region
    pub region: String,

    /// Static credentials; when unset the AWS default provider chain is used
    pub credentials: Option<Credentials>,

    /// Per-attempt request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Enable request/response logging
    pub enable_logging: bool,

    /// Custom headers to add to all requests
    pub custom_headers: Vec<(String, String)>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::Production,
            region: DEFAULT_REGION.to_string(),
            credentials: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            enable_logging: false,
            custom_headers: Vec::new(),
        }
    }
}

/// Variables read from the environment, all optional.
#[derive(Debug, Default, Deserialize)]
struct EnvSettings {
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    session_token: Option<String>,
    #[serde(default)]
    sandbox: bool,
    region: Option<String>,
    endpoint: Option<String>,
}

impl SdkConfig {
    /// Create a new configuration for the given endpoint
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }

    /// Production marketplace with the given access key pair
    pub fn production(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self::new(Endpoint::Production)
            .with_credentials(Credentials::new(access_key_id, secret_access_key))
    }

    /// Sandbox marketplace with the given access key pair
    pub fn sandbox(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self::new(Endpoint::Sandbox)
            .with_credentials(Credentials::new(access_key_id, secret_access_key))
    }

    /// Load settings from `CROWDTASK_*` environment variables.
    ///
    /// `CROWDTASK_ENDPOINT` takes precedence over `CROWDTASK_SANDBOX`.
    /// Without `CROWDTASK_ACCESS_KEY_ID`/`CROWDTASK_SECRET_ACCESS_KEY`,
    /// credentials are left to the AWS default chain; setting only one of
    /// them is a configuration error.
    pub fn from_env() -> SdkResult<Self> {
        let settings: EnvSettings = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        let credentials = match (settings.access_key_id, settings.secret_access_key) {
            (None, None) => None,
            (Some(id), Some(secret)) => {
                let mut credentials = Credentials::new(id, secret);
                credentials.session_token = settings.session_token;
                Some(credentials)
            }
            _ => {
                return Err(SdkError::ConfigurationError(format!(
                    "set both {ENV_PREFIX}_ACCESS_KEY_ID and {ENV_PREFIX}_SECRET_ACCESS_KEY"
                )))
            }
        };

        let endpoint = match settings.endpoint {
            Some(url) => Endpoint::Custom(url),
            None if settings.sandbox => Endpoint::Sandbox,
            None => Endpoint::Production,
        };

        let mut config = Self::new(endpoint);
        config.credentials = credentials;
        if let Some(region) = settings.region {
            config.region = region;
        }

        config.validate()?;
        Ok(config)
    }

    /// Create a new builder for the given endpoint
    pub fn builder(endpoint: Endpoint) -> SdkConfigBuilder {
        SdkConfigBuilder {
            config: Self::new(endpoint),
        }
    }

    /// Set the signing credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the signing region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enable request/response logging
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    /// Add a custom header to all requests
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> SdkResult<()> {
        let url = url::Url::parse(self.endpoint.url())?;
        if url.host_str().is_none() {
            return Err(SdkError::ConfigurationError(format!(
                "Endpoint has no host: {}",
                self.endpoint.url()
            )));
        }

        if self.region.is_empty() {
            return Err(SdkError::ConfigurationError(
                "Region cannot be empty".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(SdkError::ConfigurationError(
                "Timeout cannot be zero".to_string(),
            ));
        }

        if let Some(credentials) = &self.credentials {
            if credentials.access_key_id.is_empty() || credentials.secret_access_key.is_empty() {
                return Err(SdkError::ConfigurationError(
                    "Credentials cannot be empty".to_string(),
                ));
            }
        }

        for (name, value) in &self.custom_headers {
            http::HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                SdkError::ConfigurationError(format!("Invalid header name: {name:?}"))
            })?;
            http::HeaderValue::from_str(value).map_err(|_| {
                SdkError::ConfigurationError(format!("Invalid value for header {name}"))
            })?;
        }

        Ok(())
    }
}

/// Builder for SDK configuration
#[derive(Debug, Default)]
pub struct SdkConfigBuilder {
    config: SdkConfig,
}

impl SdkConfigBuilder {
    /// Create a new builder targeting production
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.config.endpoint = endpoint;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.config.region = region.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_logging(mut self, enable: bool) -> Self {
        self.config.enable_logging = enable;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Build the configuration
    pub fn build(self) -> SdkConfig {
        self.config
    }
}
