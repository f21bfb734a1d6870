//! The `CustomerService` trait.
//!
//! Implemented by storage backends (e.g. `netflix-store-sqlite`). The HTTP
//! layer (`netflix-api`) depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  ServiceError,
  customer::{Customer, NewCustomer},
  subscription::{NewSubscription, Subscription, SubscriptionOutcome},
  visual::{NewVisual, Visual},
};

/// Persistence and business rules for customers, subscriptions and visuals.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded tokio runtime.
pub trait CustomerService: Send + Sync {
  type Error: ServiceError;

  // ── Customers ─────────────────────────────────────────────────────────

  /// All customers, ordered by id.
  fn list_customers(
    &self,
  ) -> impl Future<Output = Result<Vec<Customer>, Self::Error>> + Send + '_;

  /// Returns `None` if no customer has this id.
  fn get_customer_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Customer>, Self::Error>> + Send + '_;

  /// Exact match on both fields. When several customers share the pair, the
  /// one with the lowest id is returned.
  fn get_customer_by_name_and_surname<'a>(
    &'a self,
    name: &'a str,
    surname: &'a str,
  ) -> impl Future<Output = Result<Option<Customer>, Self::Error>> + Send + 'a;

  fn list_customers_by_city<'a>(
    &'a self,
    city: &'a str,
  ) -> impl Future<Output = Result<Vec<Customer>, Self::Error>> + Send + 'a;

  /// All customers sorted by DNI ascending, ties broken by id.
  fn list_customers_by_dni(
    &self,
  ) -> impl Future<Output = Result<Vec<Customer>, Self::Error>> + Send + '_;

  /// Persist a new customer and return it with its assigned id.
  fn create_customer(
    &self,
    input: NewCustomer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  /// Replace the descriptive fields of an existing customer. The
  /// subscription and visuals are untouched.
  fn update_customer(
    &self,
    id: i64,
    input: NewCustomer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  /// Delete a customer together with its subscription and visuals.
  fn delete_customer(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Visuals ───────────────────────────────────────────────────────────

  fn list_visuals(
    &self,
  ) -> impl Future<Output = Result<Vec<Visual>, Self::Error>> + Send + '_;

  /// A customer's visuals in insertion order.
  fn list_customer_visuals(
    &self,
    customer_id: i64,
  ) -> impl Future<Output = Result<Vec<Visual>, Self::Error>> + Send + '_;

  fn add_visual(
    &self,
    input: NewVisual,
    customer_id: i64,
    product_id: i64,
  ) -> impl Future<Output = Result<Visual, Self::Error>> + Send + '_;

  /// Fails with a not-found error unless `visual_id` belongs to `customer_id`.
  fn delete_visual(
    &self,
    customer_id: i64,
    visual_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Subscriptions ─────────────────────────────────────────────────────

  fn list_subscriptions(
    &self,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + '_;

  fn get_customer_subscription(
    &self,
    customer_id: i64,
  ) -> impl Future<Output = Result<Option<Subscription>, Self::Error>> + Send + '_;

  /// Attach a subscription unless the customer already holds one.
  ///
  /// The check and the insert must be atomic: of two concurrent calls for
  /// the same customer, exactly one returns
  /// [`SubscriptionOutcome::Subscribed`].
  fn add_subscription(
    &self,
    input: NewSubscription,
    customer_id: i64,
  ) -> impl Future<Output = Result<SubscriptionOutcome, Self::Error>> + Send + '_;

  fn delete_subscription(
    &self,
    customer_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
