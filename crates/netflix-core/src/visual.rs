//! Visuals — viewing events linking a customer to a product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
  pub id:               i64,
  pub customer_id:      i64,
  /// Opaque product reference; products are not managed here.
  pub product_id:       i64,
  pub watched_at:       DateTime<Utc>,
  pub duration_minutes: Option<u32>,
}

/// JSON body accepted when recording a visual. Both fields are optional;
/// `watched_at` defaults to the time the store records it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewVisual {
  #[serde(default)]
  pub watched_at:       Option<DateTime<Utc>>,
  #[serde(default)]
  pub duration_minutes: Option<u32>,
}
