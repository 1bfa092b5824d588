use super::ApiCall;
use crate::client::{CallQuery, ParamValue};

impl ApiCall {
    // =============================================================================
    // Paging
    // =============================================================================

    /// Sets the offset of the first item (`start` query parameter).
    pub fn with_start(mut self, start: u64) -> Self {
        self.pagination.start = Some(start);
        self
    }

    /// Sets the maximum number of items (`limit` query parameter).
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    /// Asks the API to compute (or not) the total item count (`total` query parameter).
    ///
    /// Both `true` and `false` are sent; leave it unset to omit the parameter.
    pub fn with_total(mut self, total: bool) -> Self {
        self.pagination.total = Some(total);
        self
    }

    // =============================================================================
    // Filters
    // =============================================================================

    /// Adds a free-form query parameter.
    ///
    /// Reserved names (`access_token`, `start`, `limit`, `total`) are ignored when
    /// the query is rendered; use the dedicated methods instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use copernica_core::ApiClient;
    /// # fn example() -> Result<(), copernica_core::ApiClientError> {
    /// let client = ApiClient::new("my-token", false)?;
    /// let call = client
    ///     .database(17)
    ///     .profiles()
    ///     .with_param("orderby", "id")
    ///     .with_param("fields", ["city==Utrecht", "age>18"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query = self.query.add_param(name, value);
        self
    }

    /// Merges free-form query parameters; the new ones win on duplicate names.
    pub fn with_query(mut self, query: CallQuery) -> Self {
        self.query = self.query.merge(query);
        self
    }

    /// Adds a field filter condition, such as `email==john@example.com`.
    pub fn with_field(mut self, condition: impl Into<String>) -> Self {
        self.query = self.query.add_field(condition);
        self
    }

    // =============================================================================
    // Sub-resource
    // =============================================================================

    /// Targets a sub-resource by appending an extra path segment.
    ///
    /// The segment is used as is, without percent-encoding.
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        let extra = extra.into();
        self.extra = (!extra.is_empty()).then_some(extra);
        self
    }
}
