//! Conversions between domain types and the plain column values stored in
//! SQLite.
//!
//! Timestamps are stored as RFC 3339 strings. Ids are SQLite rowids.

use chrono::{DateTime, Utc};
use netflix_core::{customer::Customer, subscription::Subscription, visual::Visual};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Shared column list for customer reads; pairs with [`RawCustomer::from_row`].
pub const CUSTOMER_SELECT: &str = "
  SELECT c.customer_id, c.name, c.surname, c.city, c.dni,
         s.subscription_id, s.plan, s.created_at
  FROM customers c
  LEFT JOIN subscriptions s ON s.customer_id = c.customer_id";

/// A `customers` row joined with its optional subscription.
pub struct RawCustomer {
  pub customer_id:     i64,
  pub name:            String,
  pub surname:         String,
  pub city:            String,
  pub dni:             String,
  // subscriptions join
  pub subscription_id: Option<i64>,
  pub plan:            Option<String>,
  pub subscribed_at:   Option<String>,
}

impl RawCustomer {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      customer_id:     row.get(0)?,
      name:            row.get(1)?,
      surname:         row.get(2)?,
      city:            row.get(3)?,
      dni:             row.get(4)?,
      subscription_id: row.get(5)?,
      plan:            row.get(6)?,
      subscribed_at:   row.get(7)?,
    })
  }

  pub fn into_customer(self) -> Result<Customer> {
    let subscription = match (self.subscription_id, self.plan, self.subscribed_at) {
      (Some(id), Some(plan), Some(at)) => Some(Subscription {
        id,
        customer_id: self.customer_id,
        plan,
        created_at: decode_dt(&at)?,
      }),
      _ => None,
    };

    Ok(Customer {
      id: self.customer_id,
      name: self.name,
      surname: self.surname,
      city: self.city,
      dni: self.dni,
      subscription,
    })
  }
}

pub const SUBSCRIPTION_SELECT: &str = "
  SELECT subscription_id, customer_id, plan, created_at
  FROM subscriptions";

pub struct RawSubscription {
  pub subscription_id: i64,
  pub customer_id:     i64,
  pub plan:            String,
  pub created_at:      String,
}

impl RawSubscription {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subscription_id: row.get(0)?,
      customer_id:     row.get(1)?,
      plan:            row.get(2)?,
      created_at:      row.get(3)?,
    })
  }

  pub fn into_subscription(self) -> Result<Subscription> {
    Ok(Subscription {
      id:          self.subscription_id,
      customer_id: self.customer_id,
      plan:        self.plan,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub const VISUAL_SELECT: &str = "
  SELECT visual_id, customer_id, product_id, watched_at, duration_minutes
  FROM visuals";

pub struct RawVisual {
  pub visual_id:        i64,
  pub customer_id:      i64,
  pub product_id:       i64,
  pub watched_at:       String,
  pub duration_minutes: Option<u32>,
}

impl RawVisual {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      visual_id:        row.get(0)?,
      customer_id:      row.get(1)?,
      product_id:       row.get(2)?,
      watched_at:       row.get(3)?,
      duration_minutes: row.get(4)?,
    })
  }

  pub fn into_visual(self) -> Result<Visual> {
    Ok(Visual {
      id:               self.visual_id,
      customer_id:      self.customer_id,
      product_id:       self.product_id,
      watched_at:       decode_dt(&self.watched_at)?,
      duration_minutes: self.duration_minutes,
    })
  }
}
