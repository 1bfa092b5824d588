use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tracing::info;

use copernica_core::ApiClient;

pub const TOKEN: &str = "stub-token";

/// Stand-in for the Copernica gateway.
///
/// Unknown routes echo the request they received as JSON.
#[derive(Debug)]
pub struct StubGateway {
    addr: SocketAddr,
    server: JoinHandle<()>,
}

impl StubGateway {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("bind stub gateway")?;
        let addr = listener.local_addr()?;
        info!(%addr, "launching stub gateway");

        let server = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router()).await {
                tracing::error!(?error, "stub gateway stopped");
            }
        });

        Ok(Self { addr, server })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::builder()
            .with_token(TOKEN)
            .with_base_url(self.base_url())
            .with_timeout(Duration::from_millis(500))
            .build()
            .expect("valid client")
    }
}

impl Drop for StubGateway {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn router() -> Router {
    Router::new()
        .route("/v1/databases", get(list_databases))
        .route("/v1/database/{id}/profiles", post(create_profile))
        .route("/v1/profile/404", get(not_found))
        .route("/v1/template/500", get(server_error))
        .route("/v1/email/1", get(not_json))
        .route("/v1/datarequest/1", get(slow))
        .fallback(echo)
}

async fn list_databases() -> Json<Value> {
    Json(json!({
        "start": 0,
        "limit": 100,
        "count": 2,
        "total": 2,
        "data": [
            {"ID": "1", "name": "Newsletter"},
            {"ID": "2", "name": "Customers"}
        ]
    }))
}

async fn create_profile(Path(id): Path<u64>, body: Bytes) -> Response {
    if serde_json::from_slice::<Value>(&body).is_err() {
        return (StatusCode::BAD_REQUEST, "invalid JSON body").into_response();
    }
    let created = (id * 1000 + 1).to_string();
    (StatusCode::CREATED, [("x-created", created)]).into_response()
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": {"message": "Profile does not exist"}})),
    )
        .into_response()
}

async fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({}))
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let body = serde_json::from_slice::<Value>(&body).ok();

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "content_type": content_type,
        "body": body,
    }))
}
