use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::{AccessToken, ApiClient, ApiClientError, ReqwestTransport, Transport};

/// Copernica REST API gateway.
pub const API_GATEWAY: &str = "https://api.copernica.com";

/// Copernica REST API version segment.
pub const API_VERSION: &str = "v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating [`ApiClient`] instances.
///
/// # Default Configuration
///
/// - **Base URL**: `https://api.copernica.com`
/// - **Version**: `v1`
/// - **Timeout**: 30 seconds
/// - **Debug**: off
/// - **Transport**: [`ReqwestTransport`]
///
/// The access token has no default and must be provided.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use copernica_core::ApiClient;
///
/// # fn example() -> Result<(), copernica_core::ApiClientError> {
/// let client = ApiClient::builder()
///     .with_token("my-token")
///     .with_timeout(Duration::from_secs(10))
///     .with_debug(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    token: Option<AccessToken>,
    base_url: String,
    version: String,
    timeout: Duration,
    debug: bool,
    transport: Option<Arc<dyn Transport>>,
}

impl ApiClientBuilder {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    /// - No (or a blank) access token was provided
    /// - The base URL is not a valid absolute URL
    /// - The default reqwest transport cannot be created
    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let Self {
            token,
            base_url,
            version,
            timeout,
            debug,
            transport,
        } = self;

        let token = token
            .filter(|token| !token.is_blank())
            .ok_or(ApiClientError::MissingAccessToken)?;

        let parsed = Url::parse(&base_url).map_err(|err| ApiClientError::InvalidBaseUrl {
            error: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() || parsed.query().is_some() {
            return Err(ApiClientError::InvalidBaseUrl {
                error: format!("'{base_url}' cannot be used as a base URL"),
            });
        }

        let transport = match transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(timeout, debug)?),
        };

        Ok(ApiClient {
            transport,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            version: version.trim_matches('/').to_string(),
        })
    }

    /// Sets the access token.
    pub fn with_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Enables the verbose connection logging of the default transport.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the request timeout of the default transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the gateway base URL, e.g. to target a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the API version segment.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Injects the transport used to send requests.
    ///
    /// The timeout and debug settings only apply to the default transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            token: None,
            base_url: API_GATEWAY.to_string(),
            version: API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            transport: None,
        }
    }
}
