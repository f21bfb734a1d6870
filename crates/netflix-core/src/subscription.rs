//! Subscription plans. A customer holds at most one at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, customer::Customer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
  pub id:          i64,
  pub customer_id: i64,
  pub plan:        String,
  /// Server-assigned when the subscription is attached.
  pub created_at:  DateTime<Utc>,
}

/// JSON body accepted when attaching a subscription, e.g. `{"plan":"premium"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscription {
  pub plan: String,
}

impl NewSubscription {
  pub fn new(plan: impl Into<String>) -> Self { Self { plan: plan.into() } }

  pub fn validate(&self) -> Result<()> {
    if self.plan.trim().is_empty() {
      return Err(Error::Invalid("subscription plan must not be blank".into()));
    }
    Ok(())
  }
}

/// Result of attaching a subscription to a customer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionOutcome {
  /// The subscription was attached; carries the updated customer.
  Subscribed(Customer),
  /// The customer already held a subscription, which is left untouched.
  Conflict(Subscription),
}
