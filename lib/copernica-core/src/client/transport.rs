use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;

use super::{ApiClientError, UpstreamError};

/// Future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<http::Response<Bytes>, UpstreamError>> + Send + 'a>>;

/// The HTTP capability used by the client to reach the API gateway.
///
/// The client builds complete requests (method, URI, headers, body) and hands them
/// to the transport; the transport returns the raw response whatever its status.
/// Status interpretation stays in the client.
///
/// [`ReqwestTransport`] is used unless another transport is injected with
/// [`ApiClientBuilder::with_transport`](super::ApiClientBuilder::with_transport).
pub trait Transport: Debug + Send + Sync {
    /// Sends the request and returns the response.
    ///
    /// # Errors
    ///
    /// Fails only when no response was received (connection failure, timeout, …).
    fn send(&self, request: http::Request<Bytes>) -> TransportFuture<'_>;
}

/// Default transport backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given request timeout.
    ///
    /// With `verbose`, reqwest logs connection reads and writes.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be initialized.
    pub fn new(timeout: Duration, verbose: bool) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connection_verbose(verbose)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: http::Request<Bytes>) -> TransportFuture<'_> {
        Box::pin(async move {
            let request = reqwest::Request::try_from(request)?;
            let response = self.client.execute(request).await?;

            let status = response.status();
            let version = response.version();
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            let mut result = http::Response::new(body);
            *result.status_mut() = status;
            *result.version_mut() = version;
            *result.headers_mut() = headers;
            Ok::<_, UpstreamError>(result)
        })
    }
}
