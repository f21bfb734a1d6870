//! Handlers for `/customer` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/customer` | All customers by id |
//! | `GET`    | `/customer/dni` | All customers sorted by DNI |
//! | `GET`    | `/customer/city/:city` | Customers living in `city` |
//! | `GET`    | `/customer/:id` | 404 if not found |
//! | `GET`    | `/customer/:name/:surname` | 404 if not found |
//! | `POST`   | `/customer` | Body: [`NewCustomer`]; returns 200 + stored customer |
//! | `PUT`    | `/customer/:id` | Body: [`NewCustomer`]; replaces descriptive fields |
//! | `DELETE` | `/customer/:id` | 200 with an empty body |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use netflix_core::{
  customer::{Customer, NewCustomer},
  service::CustomerService,
};

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

// ─── Reads ────────────────────────────────────────────────────────────────────

/// `GET /customer`
pub async fn list<S: CustomerService>(
  State(service): State<Arc<S>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
  let customers = service
    .list_customers()
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(customers))
}

/// `GET /customer/:id`
pub async fn get_one<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<Json<Customer>, ApiError> {
  let customer = service
    .get_customer_by_id(id)
    .await
    .map_err(ApiError::from_service)?
    .ok_or_else(|| ApiError::NotFound(format!("customer {id} not found")))?;
  Ok(Json(customer))
}

/// `GET /customer/:name/:surname`
pub async fn get_by_name<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath((name, surname)): ApiPath<(String, String)>,
) -> Result<Json<Customer>, ApiError> {
  let customer = service
    .get_customer_by_name_and_surname(&name, &surname)
    .await
    .map_err(ApiError::from_service)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("customer {name} {surname} not found"))
    })?;
  Ok(Json(customer))
}

/// `GET /customer/city/:city`
pub async fn list_by_city<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath(city): ApiPath<String>,
) -> Result<Json<Vec<Customer>>, ApiError> {
  let customers = service
    .list_customers_by_city(&city)
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(customers))
}

/// `GET /customer/dni`
pub async fn list_by_dni<S: CustomerService>(
  State(service): State<Arc<S>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
  let customers = service
    .list_customers_by_dni()
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(customers))
}

// ─── Writes ───────────────────────────────────────────────────────────────────

/// `POST /customer` — returns 200 + the stored customer with its new id.
pub async fn create<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiJson(body): ApiJson<NewCustomer>,
) -> Result<Json<Customer>, ApiError> {
  let customer = service
    .create_customer(body)
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(customer))
}

/// `PUT /customer/:id`
pub async fn update<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath(id): ApiPath<i64>,
  ApiJson(body): ApiJson<NewCustomer>,
) -> Result<Json<Customer>, ApiError> {
  let customer = service
    .update_customer(id, body)
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(customer))
}

/// `DELETE /customer/:id`
pub async fn delete_one<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
  service
    .delete_customer(id)
    .await
    .map_err(ApiError::from_service)?;
  Ok(StatusCode::OK)
}
