use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiClientError;

/// Outcome of a successful call.
///
/// Copernica either signals a synchronous creation through the `X-Created`
/// response header, or answers with a JSON document whose shape depends on the
/// endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    /// Identifier of the created resource, taken from the `X-Created` header.
    Created(u64),
    /// Decoded response body.
    Json(Value),
}

impl CallResult {
    /// The created identifier, if the call created a resource.
    pub fn created_id(&self) -> Option<u64> {
        match self {
            Self::Created(id) => Some(*id),
            Self::Json(_) => None,
        }
    }

    /// The decoded body, if the response had one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Created(_) => None,
            Self::Json(value) => Some(value),
        }
    }

    /// Converts into a JSON value; a created identifier becomes a JSON number.
    pub fn into_value(self) -> Value {
        match self {
            Self::Created(id) => Value::from(id),
            Self::Json(value) => value,
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::UnexpectedResultShape`] with the JSON path of the
    /// first mismatch, or when the call returned a created identifier.
    ///
    /// # Example
    ///
    /// ```rust
    /// use copernica_core::CallResult;
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize)]
    /// struct Profile {
    ///     id: u64,
    /// }
    ///
    /// let result = CallResult::Json(serde_json::json!({"ID": "5", "id": 5}));
    /// let profile: Profile = result.as_json()?;
    /// assert_eq!(profile.id, 5);
    /// # Ok::<(), copernica_core::ApiClientError>(())
    /// ```
    pub fn as_json<T>(&self) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let Self::Json(value) = self else {
            return Err(ApiClientError::UnexpectedResultShape {
                path: ".".to_string(),
                error: "expected a JSON body, got a created identifier".to_string(),
            });
        };

        serde_path_to_error::deserialize(value).map_err(|err| {
            ApiClientError::UnexpectedResultShape {
                path: err.path().to_string(),
                error: err.into_inner().to_string(),
            }
        })
    }

    /// Deserializes a Copernica list envelope.
    ///
    /// # Errors
    ///
    /// See [`as_json`](Self::as_json).
    pub fn as_page<T>(&self) -> Result<Page<T>, ApiClientError>
    where
        T: DeserializeOwned,
    {
        self.as_json()
    }
}

/// A page of items as returned by Copernica list endpoints.
///
/// `total` is only present when the call asked for it with
/// [`with_total(true)`](crate::ApiCall::with_total).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    /// Offset of the first item.
    #[serde(default)]
    pub start: u64,
    /// Maximum number of items requested.
    #[serde(default)]
    pub limit: u64,
    /// Number of items in this page.
    #[serde(default)]
    pub count: u64,
    /// Total number of items, when requested.
    #[serde(default)]
    pub total: Option<u64>,
    /// The items.
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Whether more items follow this page, as far as the envelope tells.
    pub fn has_more(&self) -> bool {
        match self.total {
            Some(total) => self.start.saturating_add(self.count) < total,
            None => self.limit > 0 && self.count >= self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Profile {
        id: u64,
        fields: Fields,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Fields {
        email: String,
    }

    #[test]
    fn test_created_id() {
        let result = CallResult::Created(42);

        assert_eq!(result.created_id(), Some(42));
        assert_eq!(result.as_value(), None);
        assert_eq!(result.into_value(), json!(42));
    }

    #[test]
    fn test_json_value() {
        let result = CallResult::Json(json!({"id": 5, "name": "a"}));

        assert_eq!(result.created_id(), None);
        assert_eq!(result.as_value(), Some(&json!({"id": 5, "name": "a"})));
    }

    #[test]
    fn test_as_json_typed() {
        let result = CallResult::Json(json!({"id": 5, "fields": {"email": "a@b.com"}}));

        let profile: Profile = result.as_json().expect("should decode");

        assert_eq!(
            profile,
            Profile {
                id: 5,
                fields: Fields {
                    email: "a@b.com".to_string()
                }
            }
        );
    }

    #[test]
    fn test_as_json_reports_path() {
        let result = CallResult::Json(json!({"id": 5, "fields": {"email": 12}}));

        let error = result.as_json::<Profile>().expect_err("should fail");

        let ApiClientError::UnexpectedResultShape { path, .. } = error else {
            panic!("expected UnexpectedResultShape, got {error:?}");
        };
        assert_eq!(path, "fields.email");
    }

    #[test]
    fn test_as_json_on_created_fails() {
        let result = CallResult::Created(1);
        let error = result.as_json::<Value>().expect_err("should fail");
        assert!(matches!(error, ApiClientError::UnexpectedResultShape { .. }));
    }

    #[test]
    fn test_as_page() {
        let result = CallResult::Json(json!({
            "start": 0,
            "limit": 2,
            "count": 2,
            "total": 3,
            "data": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]
        }));

        let page: Page<Value> = result.as_page().expect("should decode");

        assert_eq!(page.count, 2);
        assert_eq!(page.total, Some(3));
        assert_eq!(page.data.len(), 2);
        assert!(page.has_more());
    }

    #[test]
    fn test_page_without_total() {
        let page: Page<Value> = CallResult::Json(json!({
            "start": 100,
            "limit": 100,
            "count": 12,
            "data": []
        }))
        .as_page()
        .expect("should decode");

        assert_eq!(page.total, None);
        assert!(!page.has_more());
    }

    #[test]
    fn test_page_at_the_end_of_the_range() {
        let page: Page<Value> = CallResult::Json(json!({
            "start": u64::MAX,
            "limit": 10,
            "count": 1,
            "total": u64::MAX,
            "data": []
        }))
        .as_page()
        .expect("should decode");

        assert_eq!(page.start, u64::MAX);
        assert!(!page.has_more());
    }
}
