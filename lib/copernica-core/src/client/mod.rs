use std::sync::Arc;

mod builder;
pub use self::builder::{API_GATEWAY, API_VERSION, ApiClientBuilder, DEFAULT_TIMEOUT};

mod call;
pub use self::call::ApiCall;

mod endpoint;
pub use self::endpoint::{EndpointArg, EndpointKind};

pub mod endpoints;
pub use self::endpoints::EndpointHandle;

mod query;
pub use self::query::{CallQuery, Pagination, ParamValue, RESERVED_PARAMS};

mod result;
pub use self::result::{CallResult, Page};

mod token;
pub use self::token::AccessToken;

mod transport;
pub use self::transport::{ReqwestTransport, Transport, TransportFuture};

mod error;
pub use self::error::{ApiClientError, UpstreamError};

/// Async client for the Copernica REST API.
///
/// The client holds the configuration shared by every call: the access token, the
/// gateway base URL, the API version and the transport. It is cheap to clone and can
/// be used concurrently from many tasks; all per-request state lives in the
/// [`ApiCall`] returned by the endpoint accessors.
///
/// # Example
///
/// ```rust,no_run
/// use copernica_core::ApiClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("my-token", false)?;
///
/// // Typed accessor
/// let profile = client.profile(42).get().await?;
///
/// // Dynamic accessor
/// let tags = client.endpoint("tags", Some("newsletter".into()))?.get().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    token: AccessToken,
    base_url: String,
    version: String,
}

impl ApiClient {
    /// Creates a client for the Copernica gateway with the default configuration.
    ///
    /// With `debug`, the default transport logs connection activity.
    ///
    /// # Errors
    ///
    /// Fails if the token is blank or the HTTP client cannot be initialized.
    pub fn new(token: impl Into<AccessToken>, debug: bool) -> Result<Self, ApiClientError> {
        Self::builder().with_token(token).with_debug(debug).build()
    }

    /// Creates a new builder for configuring a client.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Resolves an endpoint by name.
    ///
    /// Names are matched case-insensitively against [`EndpointKind`]. The returned
    /// call is fresh: nothing is shared with previous or concurrent calls.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::UnknownEndpoint`] for unknown names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use copernica_core::{ApiClient, EndpointArg};
    ///
    /// # fn example() -> Result<(), copernica_core::ApiClientError> {
    /// let client = ApiClient::new("my-token", false)?;
    ///
    /// let call = client.endpoint("database", Some(EndpointArg::Id(0)))?;
    /// assert_eq!(call.resource_path(), "databases");
    ///
    /// assert!(client.endpoint("newsletter", None).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn endpoint(
        &self,
        name: &str,
        arg: Option<EndpointArg>,
    ) -> Result<ApiCall, ApiClientError> {
        let kind = name.parse::<EndpointKind>()?;
        Ok(self.resolve(kind, arg.as_ref()))
    }

    fn resolve(&self, kind: EndpointKind, arg: Option<&EndpointArg>) -> ApiCall {
        ApiCall::new(self.clone(), kind, kind.resource_path(arg))
    }

    fn handle<E>(&self, arg: Option<EndpointArg>) -> EndpointHandle<E>
    where
        E: endpoints::Endpoint,
    {
        EndpointHandle::new(self.resolve(E::KIND, arg.as_ref()))
    }

    // =============================================================================
    // Typed accessors
    // =============================================================================

    /// `collection/{id}`
    pub fn collection(&self, id: u64) -> EndpointHandle<endpoints::Collection> {
        self.handle(Some(id.into()))
    }

    /// `database/{id}`; id `0` targets the database list.
    pub fn database(&self, id: u64) -> EndpointHandle<endpoints::Database> {
        self.handle(Some(id.into()))
    }

    /// `databases`
    pub fn databases(&self) -> EndpointHandle<endpoints::Database> {
        self.handle(None)
    }

    /// `datarequest/{id}`
    pub fn datarequest(&self, id: u64) -> EndpointHandle<endpoints::Datarequest> {
        self.handle(Some(id.into()))
    }

    /// `email/{id}`
    pub fn email(&self, id: u64) -> EndpointHandle<endpoints::Email> {
        self.handle(Some(id.into()))
    }

    /// `emailingdocument/{id}`
    pub fn emailingdocument(&self, id: u64) -> EndpointHandle<endpoints::Emailingdocument> {
        self.handle(Some(id.into()))
    }

    /// `identity`
    pub fn identity(&self) -> EndpointHandle<endpoints::Identity> {
        self.handle(None)
    }

    /// `logfiles/{name}`
    pub fn logfiles(&self, name: &str) -> EndpointHandle<endpoints::Logfiles> {
        self.handle(Some(name.into()))
    }

    /// `message/{id}`
    pub fn message(&self, id: u64) -> EndpointHandle<endpoints::Message> {
        self.handle(Some(id.into()))
    }

    /// `minirule/{id}`
    pub fn minirule(&self, id: u64) -> EndpointHandle<endpoints::Minirule> {
        self.handle(Some(id.into()))
    }

    /// `miniview/{id}`
    pub fn miniview(&self, id: u64) -> EndpointHandle<endpoints::Miniview> {
        self.handle(Some(id.into()))
    }

    /// `profile/{id}`
    pub fn profile(&self, id: u64) -> EndpointHandle<endpoints::Profile> {
        self.handle(Some(id.into()))
    }

    /// `rule/{id}`
    pub fn rule(&self, id: u64) -> EndpointHandle<endpoints::Rule> {
        self.handle(Some(id.into()))
    }

    /// `subprofile/{id}`
    pub fn subprofile(&self, id: u64) -> EndpointHandle<endpoints::Subprofile> {
        self.handle(Some(id.into()))
    }

    /// `tags/{tag}`
    pub fn tags(&self, tag: &str) -> EndpointHandle<endpoints::Tags> {
        self.handle(Some(tag.into()))
    }

    /// `template/{id}`
    pub fn template(&self, id: u64) -> EndpointHandle<endpoints::Template> {
        self.handle(Some(id.into()))
    }

    /// `view/{id}`
    pub fn view(&self, id: u64) -> EndpointHandle<endpoints::View> {
        self.handle(Some(id.into()))
    }
}
