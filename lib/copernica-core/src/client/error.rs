use std::fmt::Debug;

/// Errors that can occur when using the [`ApiClient`](super::ApiClient).
///
/// This enum covers every failure from client configuration to response decoding.
/// All variants implement `std::error::Error` and carry the context needed for debugging.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// HTTP client construction error from the underlying reqwest library.
    ///
    /// Occurs when the default transport cannot be built (e.g. TLS backend initialization).
    ReqwestError(reqwest::Error),

    /// URL parsing error when composing the request URI.
    UrlError(url::ParseError),

    /// HTTP protocol error from the http crate.
    ///
    /// Occurs when the request cannot be assembled from its parts.
    HttpError(http::Error),

    /// JSON serialization error of a request body.
    JsonValueError(serde_json::Error),

    /// Query parameter serialization error.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// The endpoint name does not match any known Copernica endpoint.
    ///
    /// Raised while resolving the endpoint, before any network activity.
    #[display("Endpoint '{name}' does not exist")]
    #[from(skip)]
    UnknownEndpoint {
        /// The name that could not be resolved.
        name: String,
    },

    /// The exchange with the API gateway failed.
    ///
    /// Covers 4xx/5xx responses as well as connection failures and timeouts.
    /// Requests are never retried.
    #[display("Bad Copernica request (status: {status:?}): {source}")]
    #[from(skip)]
    BadUpstreamRequest {
        /// The HTTP status code, when a response was received.
        status: Option<u16>,
        /// The underlying cause.
        source: UpstreamError,
    },

    /// A successful response carried a body that is not valid JSON.
    #[display("Malformed JSON response: {source}\n{body}")]
    #[from(skip)]
    MalformedResponse {
        /// The JSON decoding error.
        source: serde_json::Error,
        /// The (truncated) response body that failed to parse.
        body: String,
    },

    /// The `X-Created` response header does not hold an integer identifier.
    #[display("Invalid X-Created header value: '{value}'")]
    #[from(skip)]
    InvalidCreatedId {
        /// The raw header value.
        value: String,
    },

    /// A call result cannot be decoded into the requested type.
    #[display("Failed to deserialize result at '{path}': {error}")]
    #[from(skip)]
    UnexpectedResultShape {
        /// JSON path where decoding failed.
        path: String,
        /// Description of the failure.
        error: String,
    },

    /// No access token was configured on the builder.
    #[display("Missing Copernica access token")]
    #[from(skip)]
    MissingAccessToken,

    /// Invalid gateway base URL configuration.
    #[display("Invalid base URL: {error}")]
    #[from(skip)]
    InvalidBaseUrl {
        /// Description of why the base URL is invalid.
        error: String,
    },
}

/// Cause of a failed exchange with the API gateway.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum UpstreamError {
    /// The gateway answered with a client or server error status.
    #[display("HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The (truncated) response body.
        body: String,
    },

    /// The request did not complete within the configured timeout.
    #[display("Request timed out: {_0}")]
    Timeout(reqwest::Error),

    /// Any other failure of the reqwest transport (connect, body, redirect).
    #[display("Transport failure: {_0}")]
    Reqwest(reqwest::Error),

    /// The request could not be converted for the transport.
    #[display("Invalid request: {_0}")]
    Http(http::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout(value)
        } else {
            Self::Reqwest(value)
        }
    }
}

impl From<http::Error> for UpstreamError {
    fn from(value: http::Error) -> Self {
        Self::Http(value)
    }
}

impl ApiClientError {
    /// Returns the HTTP status code of a failed upstream exchange, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadUpstreamRequest { status, .. } => *status,
            _ => None,
        }
    }
}
