//! Handlers for `/visual` endpoints.
//!
//! Customer, product and visual ids are written with a one-letter prefix:
//! `/visual/c3/p12` means customer 3, product 12.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use netflix_core::{
  service::CustomerService,
  visual::{NewVisual, Visual},
};

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath, CustomerRef, ProductRef, Tagged, VisualRef},
};

/// `GET /visual`
pub async fn list<S: CustomerService>(
  State(service): State<Arc<S>>,
) -> Result<Json<Vec<Visual>>, ApiError> {
  let visuals = service
    .list_visuals()
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(visuals))
}

/// `GET /visual/c:customer`
pub async fn list_for_customer<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath(Tagged(customer_id)): ApiPath<CustomerRef>,
) -> Result<Json<Vec<Visual>>, ApiError> {
  let visuals = service
    .list_customer_visuals(customer_id)
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(visuals))
}

/// `POST /visual/c:customer/p:product` — body: [`NewVisual`] (may be `{}`).
pub async fn add<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath((Tagged(customer_id), Tagged(product_id))): ApiPath<(CustomerRef, ProductRef)>,
  ApiJson(body): ApiJson<NewVisual>,
) -> Result<Json<Visual>, ApiError> {
  let visual = service
    .add_visual(body, customer_id, product_id)
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(visual))
}

/// `DELETE /visual/c:customer/v:visual`
pub async fn delete_one<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath((Tagged(customer_id), Tagged(visual_id))): ApiPath<(CustomerRef, VisualRef)>,
) -> Result<StatusCode, ApiError> {
  service
    .delete_visual(customer_id, visual_id)
    .await
    .map_err(ApiError::from_service)?;
  Ok(StatusCode::OK)
}
