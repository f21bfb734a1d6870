//! JSON REST API for the Netflix customers service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`netflix_core::service::CustomerService`]. Each request makes exactly one
//! service call. TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/netflix", netflix_api::api_router(service.clone()))
//! ```

pub mod customers;
pub mod error;
pub mod extract;
pub mod subscriptions;
pub mod visuals;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use netflix_core::service::CustomerService;

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// Literal segments (`/customer/dni`, `/customer/city/...`) take priority over
/// the `{id}` and `{name}/{surname}` captures. The returned `Router<()>` can be
/// nested into any parent router regardless of its own state type.
pub fn api_router<S>(service: Arc<S>) -> Router<()>
where
  S: CustomerService + 'static,
{
  Router::new()
    // Customers
    .route("/customer", get(customers::list::<S>).post(customers::create::<S>))
    .route("/customer/dni", get(customers::list_by_dni::<S>))
    .route("/customer/city/{city}", get(customers::list_by_city::<S>))
    .route(
      "/customer/{id}",
      get(customers::get_one::<S>)
        .put(customers::update::<S>)
        .delete(customers::delete_one::<S>),
    )
    .route("/customer/{name}/{surname}", get(customers::get_by_name::<S>))
    // Visuals
    .route("/visual", get(visuals::list::<S>))
    .route("/visual/{customer}", get(visuals::list_for_customer::<S>))
    .route(
      "/visual/{customer}/{target}",
      post(visuals::add::<S>).delete(visuals::delete_one::<S>),
    )
    // Subscriptions
    .route("/suscription", get(subscriptions::list::<S>))
    .route(
      "/suscription/{customer}",
      get(subscriptions::get_for_customer::<S>)
        .post(subscriptions::add::<S>)
        .delete(subscriptions::delete_one::<S>),
    )
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use netflix_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string())),
      None => builder.body(Body::empty()),
    }
    .unwrap();
    app.clone().oneshot(req).await.unwrap()
  }

  async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn create(app: &Router, name: &str, surname: &str, city: &str, dni: &str) -> i64 {
    let resp = send(
      app,
      "POST",
      "/customer",
      Some(json!({ "name": name, "surname": surname, "city": city, "dni": dni })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["id"].as_i64().unwrap()
  }

  // ── Customers ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_input_fields_and_id() {
    let app = app().await;
    let resp = send(
      &app,
      "POST",
      "/customer",
      Some(json!({ "name": "Ana", "surname": "Lopez", "city": "Madrid", "dni": "123" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert!(body["id"].is_i64(), "body: {body}");
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["surname"], "Lopez");
    assert_eq!(body["city"], "Madrid");
    assert_eq!(body["dni"], "123");
    assert!(body["subscription"].is_null());
  }

  #[tokio::test]
  async fn list_returns_customers_in_id_order() {
    let app = app().await;
    let first = create(&app, "Luis", "Perez", "Sevilla", "900").await;
    let second = create(&app, "Ana", "Lopez", "Madrid", "123").await;

    let resp = send(&app, "GET", "/customer", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let ids: Vec<i64> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["id"].as_i64().unwrap())
      .collect();
    assert_eq!(ids, vec![first, second]);
  }

  #[tokio::test]
  async fn malformed_customer_body_returns_400() {
    let app = app().await;
    let resp = send(&app, "POST", "/customer", Some(json!({ "name": "Ana" }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn blank_customer_field_returns_400() {
    let app = app().await;
    let resp = send(
      &app,
      "POST",
      "/customer",
      Some(json!({ "name": "Ana", "surname": "", "city": "Madrid", "dni": "1" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn get_by_id_and_delete() {
    let app = app().await;
    let id = create(&app, "Ana", "Lopez", "Madrid", "123").await;

    let resp = send(&app, "GET", &format!("/customer/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], id);

    let resp = send(&app, "DELETE", &format!("/customer/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    let resp = send(&app, "GET", &format!("/customer/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, "DELETE", &format!("/customer/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn non_integer_id_returns_400() {
    let app = app().await;
    let resp = send(&app, "GET", "/customer/abc", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn dni_route_wins_over_id_capture() {
    let app = app().await;
    create(&app, "Luis", "Perez", "Sevilla", "900").await;
    create(&app, "Ana", "Lopez", "Madrid", "123").await;
    create(&app, "Eva", "Ruiz", "Madrid", "456").await;

    let resp = send(&app, "GET", "/customer/dni", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let dnis: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["dni"].as_str().unwrap())
      .collect();
    assert_eq!(dnis, vec!["123", "456", "900"]);
  }

  #[tokio::test]
  async fn city_route_wins_over_name_capture() {
    let app = app().await;
    create(&app, "Ana", "Lopez", "Madrid", "123").await;
    create(&app, "Luis", "Perez", "Sevilla", "900").await;

    let resp = send(&app, "GET", "/customer/city/Madrid", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Ana");
  }

  #[tokio::test]
  async fn get_by_name_and_surname() {
    let app = app().await;
    let id = create(&app, "Ana", "Lopez", "Madrid", "123").await;

    let resp = send(&app, "GET", "/customer/Ana/Lopez", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], id);

    let resp = send(&app, "GET", "/customer/Ana/Nobody", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn put_updates_customer() {
    let app = app().await;
    let id = create(&app, "Ana", "Lopez", "Madrid", "123").await;

    let resp = send(
      &app,
      "PUT",
      &format!("/customer/{id}"),
      Some(json!({ "name": "Ana", "surname": "Lopez", "city": "Bilbao", "dni": "123" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["city"], "Bilbao");

    let resp = send(
      &app,
      "PUT",
      "/customer/999",
      Some(json!({ "name": "A", "surname": "B", "city": "C", "dni": "D" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Subscriptions ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn second_subscription_returns_409_and_keeps_first() {
    let app = app().await;
    let id = create(&app, "Ana", "Lopez", "Madrid", "123").await;
    let uri = format!("/suscription/c{id}");

    let resp = send(&app, "POST", &uri, Some(json!({ "plan": "premium" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let customer = body_json(resp).await;
    assert_eq!(customer["id"], id);
    assert_eq!(customer["subscription"]["plan"], "premium");

    let resp = send(&app, "POST", &uri, Some(json!({ "plan": "basic" }))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
      body_json(resp).await["error"],
      subscriptions::SUBSCRIPTION_CONFLICT
    );

    let resp = send(&app, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["plan"], "premium");
  }

  #[tokio::test]
  async fn subscription_for_unknown_customer_returns_404() {
    let app = app().await;
    let resp = send(&app, "POST", "/suscription/c77", Some(json!({ "plan": "premium" }))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_subscription_then_get_returns_404() {
    let app = app().await;
    let id = create(&app, "Ana", "Lopez", "Madrid", "123").await;
    let uri = format!("/suscription/c{id}");

    send(&app, "POST", &uri, Some(json!({ "plan": "premium" }))).await;
    let resp = send(&app, "GET", "/suscription", None).await;
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);

    let resp = send(&app, "DELETE", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn unprefixed_customer_segment_returns_400() {
    let app = app().await;
    let resp = send(&app, "GET", "/suscription/5", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Visuals ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn add_then_delete_visual_roundtrip() {
    let app = app().await;
    let id = create(&app, "Ana", "Lopez", "Madrid", "123").await;

    let resp = send(
      &app,
      "POST",
      &format!("/visual/c{id}/p12"),
      Some(json!({ "watched_at": "2024-03-01T21:30:00Z", "duration_minutes": 95 })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let visual = body_json(resp).await;
    assert_eq!(visual["customer_id"], id);
    assert_eq!(visual["product_id"], 12);
    assert_eq!(visual["duration_minutes"], 95);
    let visual_id = visual["id"].as_i64().unwrap();

    let resp = send(&app, "GET", &format!("/visual/c{id}"), None).await;
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);

    let resp = send(&app, "DELETE", &format!("/visual/c{id}/v{visual_id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", &format!("/visual/c{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await.as_array().unwrap().is_empty());

    let resp = send(&app, "DELETE", &format!("/visual/c{id}/v{visual_id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn visual_with_empty_body_defaults_timestamp() {
    let app = app().await;
    let id = create(&app, "Ana", "Lopez", "Madrid", "123").await;

    let resp = send(&app, "POST", &format!("/visual/c{id}/p3"), Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let visual = body_json(resp).await;
    assert!(visual["watched_at"].is_string());
    assert!(visual["duration_minutes"].is_null());

    let resp = send(&app, "GET", "/visual", None).await;
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn visual_with_swapped_prefixes_returns_400() {
    let app = app().await;
    let id = create(&app, "Ana", "Lopez", "Madrid", "123").await;

    let resp = send(&app, "POST", &format!("/visual/c{id}/v3"), Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn visuals_of_unknown_customer_return_404() {
    let app = app().await;
    let resp = send(&app, "GET", "/visual/c404", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
