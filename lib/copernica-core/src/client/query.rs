//! Query string rendering.
//!
//! The rendered query always follows the same order:
//!
//! 1. `access_token`
//! 2. `start`, `limit`, `total`, only when explicitly set
//! 3. free-form parameters, in insertion order
//!
//! List values use indexed keys (`fields[0]=…&fields[1]=…`).
//! Free-form parameters never override a reserved one: a free-form
//! `access_token`, `start`, `limit` or `total` is dropped.

use indexmap::IndexMap;
use tracing::warn;

use super::{AccessToken, ApiClientError};

/// Parameter names controlled by the client itself.
pub const RESERVED_PARAMS: [&str; 4] = ["access_token", "start", "limit", "total"];

/// Name of the Copernica field filter parameter.
const FIELDS_PARAM: &str = "fields";

/// Value of a free-form query parameter.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum ParamValue {
    /// Rendered as `name=value`.
    Single(String),
    /// Rendered as `name[0]=a&name[1]=b`.
    Multiple(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(values: [&str; N]) -> Self {
        Self::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Free-form query parameters, such as filters, in caller-supplied order.
///
/// # Example
///
/// ```rust
/// use copernica_core::CallQuery;
///
/// let query = CallQuery::new()
///     .add_param("orderby", "id")
///     .add_param("fields", ["email==john@example.com", "city==Amsterdam"]);
/// assert_eq!(query.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallQuery {
    params: IndexMap<String, ParamValue>,
}

impl CallQuery {
    /// Creates an empty parameter collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a parameter.
    ///
    /// Replacing keeps the position of the first insertion.
    pub fn add_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Appends a Copernica field condition to the `fields` list parameter.
    pub fn add_field(mut self, condition: impl Into<String>) -> Self {
        let entry = self
            .params
            .entry(FIELDS_PARAM.to_string())
            .or_insert_with(|| ParamValue::Multiple(Vec::new()));
        let mut conditions = match std::mem::replace(entry, ParamValue::Multiple(Vec::new())) {
            ParamValue::Single(existing) => vec![existing],
            ParamValue::Multiple(existing) => existing,
        };
        conditions.push(condition.into());
        *entry = ParamValue::Multiple(conditions);
        self
    }

    /// Merges another collection into this one; `other` wins on duplicate names.
    pub fn merge(mut self, other: Self) -> Self {
        self.params.extend(other.params);
        self
    }

    /// Whether no free-form parameter was given.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of free-form parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns the value of a parameter.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    fn pairs(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.params
            .iter()
            .filter(|(name, _)| {
                let reserved = RESERVED_PARAMS.contains(&name.as_str());
                if reserved {
                    warn!(%name, "ignoring free-form parameter that shadows a reserved one");
                }
                !reserved
            })
            .flat_map(|(name, value)| match value {
                ParamValue::Single(value) => vec![(name.clone(), value.as_str())],
                ParamValue::Multiple(values) => values
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (format!("{name}[{index}]"), value.as_str()))
                    .collect(),
            })
    }
}

impl<K, V> FromIterator<(K, V)> for CallQuery
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |query, (name, value)| query.add_param(name, value))
    }
}

/// The reserved paging parameters of one call.
///
/// `None` means "not set" and the parameter is left out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Offset of the first item.
    pub start: Option<u64>,
    /// Maximum number of items.
    pub limit: Option<u64>,
    /// Whether the API should compute the total item count.
    pub total: Option<bool>,
}

/// Renders the complete, URL-encoded query string of a call.
pub(in crate::client) fn render_query(
    token: &AccessToken,
    pagination: &Pagination,
    query: &CallQuery,
) -> Result<String, ApiClientError> {
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(4 + query.len());
    pairs.push(("access_token".to_string(), token.expose().to_string()));

    if let Some(start) = pagination.start {
        pairs.push(("start".to_string(), start.to_string()));
    }
    if let Some(limit) = pagination.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(total) = pagination.total {
        let total = if total { "1" } else { "0" };
        pairs.push(("total".to_string(), total.to_string()));
    }

    pairs.extend(query.pairs().map(|(name, value)| (name, value.to_string())));

    let result = serde_urlencoded::to_string(&pairs)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> AccessToken {
        AccessToken::from("T")
    }

    #[test]
    fn test_only_access_token_by_default() {
        let result = render_query(&token(), &Pagination::default(), &CallQuery::new())
            .expect("should render");

        insta::assert_snapshot!(result, @"access_token=T");
    }

    #[test]
    fn test_reserved_params_in_fixed_order() {
        let pagination = Pagination {
            start: Some(10),
            limit: Some(50),
            total: Some(true),
        };

        let result =
            render_query(&token(), &pagination, &CallQuery::new()).expect("should render");

        insta::assert_snapshot!(result, @"access_token=T&start=10&limit=50&total=1");
    }

    #[test]
    fn test_every_combination_of_reserved_params() {
        let starts = [None, Some(0), Some(20)];
        let limits = [None, Some(0), Some(100)];
        let totals = [None, Some(false), Some(true)];

        for start in starts {
            for limit in limits {
                for total in totals {
                    let pagination = Pagination {
                        start,
                        limit,
                        total,
                    };
                    let result = render_query(&token(), &pagination, &CallQuery::new())
                        .expect("should render");

                    let keys: Vec<&str> = result
                        .split('&')
                        .filter_map(|pair| pair.split('=').next())
                        .collect();
                    let mut expected = vec!["access_token"];
                    if start.is_some() {
                        expected.push("start");
                    }
                    if limit.is_some() {
                        expected.push("limit");
                    }
                    if total.is_some() {
                        expected.push("total");
                    }
                    assert_eq!(keys, expected, "for {pagination:?}");
                }
            }
        }
    }

    #[test]
    fn test_zero_start_is_not_unset() {
        let pagination = Pagination {
            start: Some(0),
            ..Pagination::default()
        };

        let result =
            render_query(&token(), &pagination, &CallQuery::new()).expect("should render");

        insta::assert_snapshot!(result, @"access_token=T&start=0");
    }

    #[test]
    fn test_false_total_is_set() {
        let pagination = Pagination {
            total: Some(false),
            ..Pagination::default()
        };

        let result =
            render_query(&token(), &pagination, &CallQuery::new()).expect("should render");

        insta::assert_snapshot!(result, @"access_token=T&total=0");
    }

    #[test]
    fn test_free_form_params_follow_reserved_ones_in_insertion_order() {
        let pagination = Pagination {
            limit: Some(5),
            ..Pagination::default()
        };
        let query = CallQuery::new()
            .add_param("orderby", "id")
            .add_param("order", "desc");

        let result = render_query(&token(), &pagination, &query).expect("should render");

        insta::assert_snapshot!(result, @"access_token=T&limit=5&orderby=id&order=desc");
    }

    #[test]
    fn test_list_values_use_indexed_keys() {
        let query = CallQuery::new().add_param("fields", ["email==a@b.com", "city==Utrecht"]);

        let result =
            render_query(&token(), &Pagination::default(), &query).expect("should render");

        insta::assert_snapshot!(result, @"access_token=T&fields%5B0%5D=email%3D%3Da%40b.com&fields%5B1%5D=city%3D%3DUtrecht");
    }

    #[test]
    fn test_reserved_params_win_over_free_form() {
        let pagination = Pagination {
            limit: Some(5),
            ..Pagination::default()
        };
        let query = CallQuery::new()
            .add_param("access_token", "stolen")
            .add_param("limit", "1000")
            .add_param("start", "3")
            .add_param("orderby", "id");

        let result = render_query(&token(), &pagination, &query).expect("should render");

        insta::assert_snapshot!(result, @"access_token=T&limit=5&orderby=id");
    }

    #[test]
    fn test_values_are_url_encoded() {
        let query = CallQuery::new().add_param("fields[email]", "=a@b.com");

        let result =
            render_query(&token(), &Pagination::default(), &query).expect("should render");

        insta::assert_snapshot!(result, @"access_token=T&fields%5Bemail%5D=%3Da%40b.com");
    }

    #[test]
    fn test_add_field_appends_conditions() {
        let query = CallQuery::new()
            .add_field("email==a@b.com")
            .add_field("city==Utrecht");

        assert_eq!(
            query.get("fields"),
            Some(&ParamValue::Multiple(vec![
                "email==a@b.com".to_string(),
                "city==Utrecht".to_string(),
            ]))
        );
    }

    #[test]
    fn test_add_field_upgrades_single_value() {
        let query = CallQuery::new()
            .add_param("fields", "email==a@b.com")
            .add_field("city==Utrecht");

        assert_eq!(
            query.get("fields"),
            Some(&ParamValue::from(vec!["email==a@b.com", "city==Utrecht"]))
        );
    }

    #[test]
    fn test_replacing_a_param_keeps_its_position() {
        let query = CallQuery::new()
            .add_param("a", "1")
            .add_param("b", "2")
            .add_param("a", "3");

        let result =
            render_query(&token(), &Pagination::default(), &query).expect("should render");

        insta::assert_snapshot!(result, @"access_token=T&a=3&b=2");
    }

    #[test]
    fn test_merge_prefers_other() {
        let query = CallQuery::new()
            .add_param("a", "1")
            .merge(CallQuery::from_iter([("a", "2"), ("b", "3")]));

        assert_eq!(query.get("a"), Some(&ParamValue::from("2")));
        assert_eq!(query.len(), 2);
    }
}
