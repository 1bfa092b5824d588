//! # Copernica Core
//!
//! Async client for the [Copernica](https://www.copernica.com) marketing automation REST API.
//!
//! The client builds authenticated requests against the API gateway
//! (`https://api.copernica.com/v1`), resolves endpoint names to resource paths and
//! decodes the JSON responses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use copernica_core::{ApiClient, Page};
//! # use serde::Deserialize;
//! # #[derive(Deserialize)]
//! # struct Profile { id: u64 }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("my-access-token", false)?;
//!
//! // List the profiles of a database
//! let page: Page<Profile> = client
//!     .database(17)
//!     .profiles()
//!     .with_field("city==Utrecht")
//!     .with_limit(100)
//!     .with_total(true)
//!     .get()
//!     .await?
//!     .as_page()?;
//!
//! // Create a profile; Copernica answers with the new id
//! let created = client
//!     .database(17)
//!     .profiles()
//!     .post(&serde_json::json!({"fields": {"email": "john@example.com"}}))
//!     .await?;
//! println!("created profile {:?}", created.created_id());
//! # Ok(())
//! # }
//! ```
//!
//! ## Endpoints
//!
//! Every known endpoint has a typed accessor on [`ApiClient`] (`profile(id)`,
//! `tags(tag)`, `databases()`, …) returning an [`EndpointHandle`] with the
//! sub-resources of that endpoint. Endpoints can also be resolved by name with
//! [`ApiClient::endpoint`]:
//!
//! | Name | Resource path |
//! |------|---------------|
//! | `database` + `0` | `databases` |
//! | `database` + `17` | `database/17` |
//! | `tags` + `"vip"` | `tags/vip` |
//! | `identity` | `identity` |
//!
//! ## Responses
//!
//! A call yields a [`CallResult`]:
//! - [`CallResult::Created`] when the API reports the id of a created resource
//!   through the `X-Created` header
//! - [`CallResult::Json`] otherwise, with the decoded body
//!
//! Any 4xx/5xx status, connection failure or timeout is reported as
//! [`ApiClientError::BadUpstreamRequest`]. Requests are never retried.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for every exchange, `warn` for
//! ignored parameters) and never installs a subscriber. The access token is never
//! logged.
//!
//! ## Testing
//!
//! Inject a [`Transport`] with [`ApiClientBuilder::with_transport`] to run calls
//! against an in-memory fake, or point [`ApiClientBuilder::with_base_url`] to a
//! local stub server.

mod client;

// Public API - only expose user-facing types and functions
pub use self::client::{
    API_GATEWAY, API_VERSION, AccessToken, ApiCall, ApiClient, ApiClientBuilder, ApiClientError,
    CallQuery, CallResult, DEFAULT_TIMEOUT, EndpointArg, EndpointHandle, EndpointKind, Page,
    Pagination, ParamValue, RESERVED_PARAMS, ReqwestTransport, Transport, TransportFuture,
    UpstreamError, endpoints,
};
