//! Handlers for `/suscription` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/suscription` | All subscriptions |
//! | `GET`    | `/suscription/c:customer` | 404 if the customer has none |
//! | `POST`   | `/suscription/c:customer` | Body: [`NewSubscription`]; 200 + customer, or 409 |
//! | `DELETE` | `/suscription/c:customer` | 404 if the customer has none |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use netflix_core::{
  customer::Customer,
  service::CustomerService,
  subscription::{NewSubscription, Subscription, SubscriptionOutcome},
};

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath, CustomerRef, Tagged},
};

/// Body of the 409 returned when a customer already holds a subscription.
pub const SUBSCRIPTION_CONFLICT: &str =
  "ERROR. The customer already holds a subscription";

/// `GET /suscription`
pub async fn list<S: CustomerService>(
  State(service): State<Arc<S>>,
) -> Result<Json<Vec<Subscription>>, ApiError> {
  let subscriptions = service
    .list_subscriptions()
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(subscriptions))
}

/// `GET /suscription/c:customer`
pub async fn get_for_customer<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath(Tagged(customer_id)): ApiPath<CustomerRef>,
) -> Result<Json<Subscription>, ApiError> {
  let subscription = service
    .get_customer_subscription(customer_id)
    .await
    .map_err(ApiError::from_service)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("customer {customer_id} has no subscription"))
    })?;
  Ok(Json(subscription))
}

/// `POST /suscription/c:customer` — body: `{"plan":"..."}`.
pub async fn add<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath(Tagged(customer_id)): ApiPath<CustomerRef>,
  ApiJson(body): ApiJson<NewSubscription>,
) -> Result<Json<Customer>, ApiError> {
  let outcome = service
    .add_subscription(body, customer_id)
    .await
    .map_err(ApiError::from_service)?;

  match outcome {
    SubscriptionOutcome::Subscribed(customer) => Ok(Json(customer)),
    SubscriptionOutcome::Conflict(existing) => {
      tracing::warn!(
        customer_id,
        subscription_id = existing.id,
        "rejected second subscription"
      );
      Err(ApiError::Conflict(SUBSCRIPTION_CONFLICT.to_owned()))
    }
  }
}

/// `DELETE /suscription/c:customer`
pub async fn delete_one<S: CustomerService>(
  State(service): State<Arc<S>>,
  ApiPath(Tagged(customer_id)): ApiPath<CustomerRef>,
) -> Result<StatusCode, ApiError> {
  service
    .delete_subscription(customer_id)
    .await
    .map_err(ApiError::from_service)?;
  Ok(StatusCode::OK)
}
