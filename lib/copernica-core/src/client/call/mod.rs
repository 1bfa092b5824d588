use super::{ApiClient, CallQuery, EndpointKind, Pagination};

pub(in crate::client) const BODY_MAX_LENGTH: usize = 1024;

mod builder;
mod execution;

/// Request descriptor for a single Copernica API call.
///
/// An `ApiCall` is created by resolving an endpoint on an [`ApiClient`] and owns all
/// per-request state: the resource path, the optional extra segment, the paging
/// parameters and the free-form query. It is consumed by one of the verbs, so
/// concurrent calls made through the same client never share mutable state.
///
/// # Method Groups
///
/// ## Request Configuration
/// - [`with_start(start)`](Self::with_start) - Offset of the first item
/// - [`with_limit(limit)`](Self::with_limit) - Maximum number of items
/// - [`with_total(total)`](Self::with_total) - Ask for the total item count
/// - [`with_param(name, value)`](Self::with_param) - Add a free-form query parameter
/// - [`with_query(query)`](Self::with_query) - Merge free-form query parameters
/// - [`with_field(condition)`](Self::with_field) - Add a field filter condition
/// - [`with_extra(segment)`](Self::with_extra) - Target a sub-resource
///
/// ## Execution
/// - [`get()`](Self::get), [`delete()`](Self::delete)
/// - [`post(body)`](Self::post), [`put(body)`](Self::put) - JSON body
///
/// # Example
///
/// ```rust,no_run
/// use copernica_core::{ApiClient, EndpointArg};
///
/// # async fn example() -> Result<(), copernica_core::ApiClientError> {
/// let client = ApiClient::new("my-token", false)?;
///
/// let result = client
///     .endpoint("database", Some(EndpointArg::Id(17)))?
///     .with_extra("profiles")
///     .with_limit(10)
///     .with_total(true)
///     .get()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(derive_more::Debug, Clone)]
pub struct ApiCall {
    #[debug(skip)]
    pub(super) client: ApiClient,
    pub(super) endpoint: EndpointKind,
    pub(super) resource: String,
    pub(super) extra: Option<String>,
    pub(super) pagination: Pagination,
    pub(super) query: CallQuery,
}

impl ApiCall {
    pub(in crate::client) fn new(
        client: ApiClient,
        endpoint: EndpointKind,
        resource: String,
    ) -> Self {
        Self {
            client,
            endpoint,
            resource,
            extra: None,
            pagination: Pagination::default(),
            query: CallQuery::default(),
        }
    }

    /// The resolved endpoint.
    pub fn endpoint(&self) -> EndpointKind {
        self.endpoint
    }

    /// The resolved resource path, e.g. `profile/42`.
    pub fn resource_path(&self) -> &str {
        &self.resource
    }

    /// The extra path segment, if any.
    pub fn extra(&self) -> Option<&str> {
        self.extra.as_deref()
    }

    /// The paging parameters.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// The free-form query parameters.
    pub fn query(&self) -> &CallQuery {
        &self.query
    }
}
