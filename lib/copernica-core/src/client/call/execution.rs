use bytes::Bytes;
use headers::{ContentType, HeaderMapExt};
use http::{Method, StatusCode};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::{ApiCall, BODY_MAX_LENGTH};
use crate::client::query::render_query;
use crate::client::{ApiClientError, CallResult, UpstreamError};

/// Response header carrying the id of a synchronously created resource.
pub(in crate::client) const X_CREATED: &str = "x-created";

impl ApiCall {
    /// Sends a `GET` request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request URI cannot be built
    /// - The exchange fails or the API answers with a 4xx/5xx status ([`ApiClientError::BadUpstreamRequest`])
    /// - The body is not valid JSON ([`ApiClientError::MalformedResponse`])
    pub async fn get(self) -> Result<CallResult, ApiClientError> {
        self.exchange(Method::GET, None).await
    }

    /// Sends a `POST` request with `body` serialized as JSON.
    ///
    /// When the API creates the resource synchronously, the result is
    /// [`CallResult::Created`] holding the new identifier.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use copernica_core::ApiClient;
    /// # async fn example() -> Result<(), copernica_core::ApiClientError> {
    /// let client = ApiClient::new("my-token", false)?;
    /// let created = client
    ///     .database(17)
    ///     .profiles()
    ///     .post(&serde_json::json!({"fields": {"email": "john@example.com"}}))
    ///     .await?;
    /// let id = created.created_id();
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get), plus body serialization failures.
    pub async fn post<B>(self, body: &B) -> Result<CallResult, ApiClientError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        self.exchange(Method::POST, Some(body)).await
    }

    /// Sends a `PUT` request with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`post`](Self::post).
    pub async fn put<B>(self, body: &B) -> Result<CallResult, ApiClientError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        self.exchange(Method::PUT, Some(body)).await
    }

    /// Sends a `DELETE` request.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn delete(self) -> Result<CallResult, ApiClientError> {
        self.exchange(Method::DELETE, None).await
    }

    /// Builds the full request URI: `{base}/{version}/{resource}[/{extra}]?{query}`.
    ///
    /// The URI embeds the access token; do not log it.
    ///
    /// # Errors
    ///
    /// Fails when the query cannot be encoded or the result is not a valid URL.
    pub fn to_url(&self) -> Result<Url, ApiClientError> {
        let client = &self.client;
        let mut parts = vec![
            client.base_url.as_str(),
            client.version.as_str(),
            self.resource.as_str(),
        ];
        if let Some(extra) = &self.extra {
            parts.push(extra.as_str());
        }

        let query = render_query(&client.token, &self.pagination, &self.query)?;
        let url = format!("{}?{query}", parts.join("/"));
        let url = url.parse::<Url>()?;
        Ok(url)
    }

    async fn exchange(
        self,
        method: Method,
        body: Option<Vec<u8>>,
    ) -> Result<CallResult, ApiClientError> {
        let url = self.to_url()?;
        let request = Self::build_request(method.clone(), &url, body)?;

        debug!(%method, resource = %self.resource, extra = ?self.extra, "sending...");
        let response = self
            .client
            .transport
            .send(request)
            .await
            .map_err(|source| ApiClientError::BadUpstreamRequest {
                status: None,
                source,
            })?;
        debug!(%method, resource = %self.resource, status = %response.status(), "...receiving");

        read_response(response)
    }

    pub(super) fn build_request(
        method: Method,
        url: &Url,
        body: Option<Vec<u8>>,
    ) -> Result<http::Request<Bytes>, ApiClientError> {
        let with_body = matches!(method, Method::POST | Method::PUT);
        let mut request = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(Bytes::new())?;

        if with_body {
            request
                .headers_mut()
                .typed_insert(ContentType::from(mime::APPLICATION_JSON));
            *request.body_mut() = Bytes::from(body.unwrap_or_else(|| b"null".to_vec()));
        }

        Ok(request)
    }
}

/// Interprets a raw gateway response.
///
/// In order: 4xx/5xx statuses fail, an `X-Created` header yields the created id,
/// anything else is decoded as JSON. An empty body is not valid JSON and fails.
pub(in crate::client) fn read_response(
    response: http::Response<Bytes>,
) -> Result<CallResult, ApiClientError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(upstream_status_error(status, response.body()));
    }

    if let Some(created) = response.headers().get(X_CREATED) {
        let value = String::from_utf8_lossy(created.as_bytes()).trim().to_string();
        let id = value
            .parse::<u64>()
            .map_err(|_| ApiClientError::InvalidCreatedId { value })?;
        return Ok(CallResult::Created(id));
    }

    let body = response.into_body();
    let value = serde_json::from_slice(&body).map_err(|source| {
        ApiClientError::MalformedResponse {
            source,
            body: truncate_body(&body),
        }
    })?;
    Ok(CallResult::Json(value))
}

fn upstream_status_error(status: StatusCode, body: &Bytes) -> ApiClientError {
    let status = status.as_u16();
    ApiClientError::BadUpstreamRequest {
        status: Some(status),
        source: UpstreamError::Status {
            status,
            body: truncate_body(body),
        },
    }
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() > BODY_MAX_LENGTH {
        let cut = (0..=BODY_MAX_LENGTH)
            .rev()
            .find(|index| text.is_char_boundary(*index))
            .unwrap_or_default();
        format!("{}... (truncated)", text.get(..cut).unwrap_or_default())
    } else {
        text.into_owned()
    }
}
