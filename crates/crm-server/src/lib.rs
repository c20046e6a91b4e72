//! Composition root for the CRM server.
//!
//! Wires the SQLite context into the repositories and the repositories into
//! the JSON API. Built once at startup by the binary.

use std::path::PathBuf;

use axum::Router;
use crm_api::Services;
use crm_core::repository::{CustomerRepo, NotesRepo};
use crm_store_sqlite::SqliteContext;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CRM_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub const DEFAULT_HOST: &'static str = "127.0.0.1";
  pub const DEFAULT_PORT: u16 = 8080;
  pub const DEFAULT_STORE_PATH: &'static str = "crm.sqlite3";
}

// ─── Services ────────────────────────────────────────────────────────────────

/// The service locator handed to the router. Each request gets repositories
/// over its own clone of the context handle.
#[derive(Debug, Clone)]
pub struct AppServices {
  context: SqliteContext,
}

impl AppServices {
  pub fn new(context: SqliteContext) -> Self { Self { context } }
}

impl Services for AppServices {
  type Customers = CustomerRepo<SqliteContext>;
  type Notes = NotesRepo<SqliteContext>;

  fn customers(&self) -> Self::Customers { CustomerRepo::new(self.context.clone()) }

  fn notes(&self) -> Self::Notes { NotesRepo::new(self.context.clone()) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router with request tracing.
pub fn router(services: AppServices) -> Router {
  crm_api::api_router(services).layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  async fn services() -> AppServices {
    AppServices::new(SqliteContext::open_in_memory().await.unwrap())
  }

  async fn oneshot(
    services: &AppServices,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
    router(services.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn create_customer(services: &AppServices, first_name: &str) -> i64 {
    let resp = oneshot(
      services,
      "POST",
      "/customers",
      Some(json!({
        "first_name": first_name,
        "last_name": "Smith",
        "company": "Acme",
        "status": "Prospective",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await["id"].as_i64().unwrap()
  }

  #[tokio::test]
  async fn empty_store_lists_no_customers() {
    let services = services().await;
    let resp = oneshot(&services, "GET", "/customers", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!([]));
  }

  #[tokio::test]
  async fn created_customer_can_be_fetched() {
    let services = services().await;
    let id = create_customer(&services, "Liz").await;

    let resp = oneshot(&services, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["first_name"], "Liz");
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["status"], "Prospective");
    assert!(body["created"].as_str().unwrap().ends_with('Z'));
  }

  #[tokio::test]
  async fn status_update_round_trip() {
    let services = services().await;
    let id = create_customer(&services, "Liz").await;

    let resp = oneshot(
      &services,
      "PUT",
      &format!("/customers/{id}/status"),
      Some(json!({ "status": "NonActive" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot(&services, "GET", "/customers", None).await;
    assert_eq!(json_body(resp).await[0]["status"], "NonActive");
  }

  #[tokio::test]
  async fn status_update_for_missing_customer_is_404() {
    let services = services().await;
    let resp = oneshot(
      &services,
      "PUT",
      "/customers/77/status",
      Some(json!({ "status": "Current" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn notes_are_added_edited_and_listed() {
    let services = services().await;
    let customer_id = create_customer(&services, "Liz").await;

    let resp = oneshot(
      &services,
      "POST",
      "/notes",
      Some(json!({ "customer_id": customer_id, "content": "first call" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(header::LOCATION).unwrap().clone();
    let note_id = json_body(resp).await["id"].as_i64().unwrap();
    assert_eq!(location, format!("/notes/{note_id}"));

    let resp = oneshot(
      &services,
      "PUT",
      &format!("/notes/{note_id}"),
      Some(json!({ "id": note_id, "content": "follow-up booked" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot(&services, "GET", &format!("/customers/{customer_id}/notes"), None).await;
    assert_eq!(
      json_body(resp).await,
      json!([{ "id": note_id, "content": "follow-up booked" }])
    );
  }

  #[tokio::test]
  async fn note_for_missing_customer_is_a_server_error() {
    let services = services().await;
    let resp = oneshot(
      &services,
      "POST",
      "/notes",
      Some(json!({ "customer_id": 404, "content": "orphan" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[tokio::test]
  async fn put_of_missing_note_is_accepted() {
    let services = services().await;
    let resp = oneshot(
      &services,
      "PUT",
      "/notes/41",
      Some(json!({ "id": 41, "content": "never stored" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  }

  #[tokio::test]
  async fn delete_returns_detail_then_404() {
    let services = services().await;
    let id = create_customer(&services, "Liz").await;

    let resp = oneshot(&services, "DELETE", &format!("/customers/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["first_name"], "Liz");

    let resp = oneshot(&services, "DELETE", &format!("/customers/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = oneshot(&services, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
