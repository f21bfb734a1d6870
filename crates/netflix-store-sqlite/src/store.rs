//! [`SqliteStore`] — the SQLite implementation of [`CustomerService`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use netflix_core::{
  customer::{Customer, NewCustomer},
  service::CustomerService,
  subscription::{NewSubscription, Subscription, SubscriptionOutcome},
  visual::{NewVisual, Visual},
};

use crate::{
  encode::{
    CUSTOMER_SELECT, RawCustomer, RawSubscription, RawVisual, SUBSCRIPTION_SELECT,
    VISUAL_SELECT, encode_dt,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A customer service backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn customers_where(
    &self,
    filter: &'static str,
    args: Vec<String>,
  ) -> Result<Vec<Customer>> {
    let raws = self
      .conn
      .call(move |conn| {
        Ok(query_customers(
          conn,
          filter,
          rusqlite::params_from_iter(args.iter()),
        )?)
      })
      .await?;

    raws.into_iter().map(RawCustomer::into_customer).collect()
  }
}

// ─── Query helpers ───────────────────────────────────────────────────────────
//
// These run inside a `call` closure on the database thread.

fn query_customers<P: rusqlite::Params>(
  conn: &rusqlite::Connection,
  filter: &str,
  params: P,
) -> rusqlite::Result<Vec<RawCustomer>> {
  let mut stmt = conn.prepare(&format!("{CUSTOMER_SELECT} {filter}"))?;
  let rows = stmt
    .query_map(params, RawCustomer::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>();
  rows
}

fn query_subscriptions<P: rusqlite::Params>(
  conn: &rusqlite::Connection,
  filter: &str,
  params: P,
) -> rusqlite::Result<Vec<RawSubscription>> {
  let mut stmt = conn.prepare(&format!("{SUBSCRIPTION_SELECT} {filter}"))?;
  let rows = stmt
    .query_map(params, RawSubscription::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>();
  rows
}

fn query_visuals<P: rusqlite::Params>(
  conn: &rusqlite::Connection,
  filter: &str,
  params: P,
) -> rusqlite::Result<Vec<RawVisual>> {
  let mut stmt = conn.prepare(&format!("{VISUAL_SELECT} {filter}"))?;
  let rows = stmt
    .query_map(params, RawVisual::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>();
  rows
}

fn customer_exists(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM customers WHERE customer_id = ?1",
        rusqlite::params![id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

/// What the subscription transaction observed, before decoding.
enum RawSubscribe {
  MissingCustomer,
  Conflict(RawSubscription),
  Subscribed(RawCustomer),
}

/// Outcome of a delete scoped to an existing customer.
enum ScopedDelete {
  MissingCustomer,
  Deleted(usize),
}

// ─── CustomerService impl ────────────────────────────────────────────────────

impl CustomerService for SqliteStore {
  type Error = crate::Error;

  // ── Customers ─────────────────────────────────────────────────────────────

  async fn list_customers(&self) -> Result<Vec<Customer>> {
    self.customers_where("ORDER BY c.customer_id", vec![]).await
  }

  async fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          query_customers(conn, "WHERE c.customer_id = ?1", rusqlite::params![id])?
            .into_iter()
            .next(),
        )
      })
      .await?;

    raw.map(RawCustomer::into_customer).transpose()
  }

  async fn get_customer_by_name_and_surname(
    &self,
    name: &str,
    surname: &str,
  ) -> Result<Option<Customer>> {
    let mut found = self
      .customers_where(
        "WHERE c.name = ?1 AND c.surname = ?2 ORDER BY c.customer_id LIMIT 1",
        vec![name.to_owned(), surname.to_owned()],
      )
      .await?;
    Ok(found.pop())
  }

  async fn list_customers_by_city(&self, city: &str) -> Result<Vec<Customer>> {
    self
      .customers_where("WHERE c.city = ?1 ORDER BY c.customer_id", vec![city.to_owned()])
      .await
  }

  async fn list_customers_by_dni(&self) -> Result<Vec<Customer>> {
    self
      .customers_where("ORDER BY c.dni ASC, c.customer_id ASC", vec![])
      .await
  }

  async fn create_customer(&self, input: NewCustomer) -> Result<Customer> {
    input.validate()?;

    let NewCustomer { name, surname, city, dni } = input.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO customers (name, surname, city, dni) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![name, surname, city, dni],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(customer_id = id, "created customer");

    Ok(Customer {
      id,
      name: input.name,
      surname: input.surname,
      city: input.city,
      dni: input.dni,
      subscription: None,
    })
  }

  async fn update_customer(&self, id: i64, input: NewCustomer) -> Result<Customer> {
    input.validate()?;

    let NewCustomer { name, surname, city, dni } = input;
    let raw = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE customers SET name = ?2, surname = ?3, city = ?4, dni = ?5
           WHERE customer_id = ?1",
          rusqlite::params![id, name, surname, city, dni],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(
          query_customers(conn, "WHERE c.customer_id = ?1", rusqlite::params![id])?
            .into_iter()
            .next(),
        )
      })
      .await?;

    let raw = raw.ok_or(netflix_core::Error::CustomerNotFound(id))?;
    tracing::debug!(customer_id = id, "updated customer");
    raw.into_customer()
  }

  async fn delete_customer(&self, id: i64) -> Result<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM customers WHERE customer_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(netflix_core::Error::CustomerNotFound(id).into());
    }
    tracing::debug!(customer_id = id, "deleted customer");
    Ok(())
  }

  // ── Visuals ───────────────────────────────────────────────────────────────

  async fn list_visuals(&self) -> Result<Vec<Visual>> {
    let raws = self
      .conn
      .call(|conn| Ok(query_visuals(conn, "ORDER BY visual_id", [])?))
      .await?;

    raws.into_iter().map(RawVisual::into_visual).collect()
  }

  async fn list_customer_visuals(&self, customer_id: i64) -> Result<Vec<Visual>> {
    let raws = self
      .conn
      .call(move |conn| {
        if !customer_exists(conn, customer_id)? {
          return Ok(None);
        }
        Ok(Some(query_visuals(
          conn,
          "WHERE customer_id = ?1 ORDER BY visual_id",
          rusqlite::params![customer_id],
        )?))
      })
      .await?
      .ok_or(netflix_core::Error::CustomerNotFound(customer_id))?;

    raws.into_iter().map(RawVisual::into_visual).collect()
  }

  async fn add_visual(
    &self,
    input: NewVisual,
    customer_id: i64,
    product_id: i64,
  ) -> Result<Visual> {
    let watched_at       = input.watched_at.unwrap_or_else(Utc::now);
    let watched_at_str   = encode_dt(watched_at);
    let duration_minutes = input.duration_minutes;

    let id = self
      .conn
      .call(move |conn| {
        if !customer_exists(conn, customer_id)? {
          return Ok(None);
        }
        conn.execute(
          "INSERT INTO visuals (customer_id, product_id, watched_at, duration_minutes)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![customer_id, product_id, watched_at_str, duration_minutes],
        )?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?
      .ok_or(netflix_core::Error::CustomerNotFound(customer_id))?;

    tracing::debug!(customer_id, product_id, visual_id = id, "recorded visual");

    Ok(Visual {
      id,
      customer_id,
      product_id,
      watched_at,
      duration_minutes,
    })
  }

  async fn delete_visual(&self, customer_id: i64, visual_id: i64) -> Result<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM visuals WHERE visual_id = ?1 AND customer_id = ?2",
          rusqlite::params![visual_id, customer_id],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(
        netflix_core::Error::VisualNotFound { customer_id, visual_id }.into(),
      );
    }
    tracing::debug!(customer_id, visual_id, "deleted visual");
    Ok(())
  }

  // ── Subscriptions ─────────────────────────────────────────────────────────

  async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
    let raws = self
      .conn
      .call(|conn| Ok(query_subscriptions(conn, "ORDER BY subscription_id", [])?))
      .await?;

    raws.into_iter().map(RawSubscription::into_subscription).collect()
  }

  async fn get_customer_subscription(
    &self,
    customer_id: i64,
  ) -> Result<Option<Subscription>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          query_subscriptions(
            conn,
            "WHERE customer_id = ?1",
            rusqlite::params![customer_id],
          )?
          .into_iter()
          .next(),
        )
      })
      .await?;

    raw.map(RawSubscription::into_subscription).transpose()
  }

  async fn add_subscription(
    &self,
    input: NewSubscription,
    customer_id: i64,
  ) -> Result<SubscriptionOutcome> {
    input.validate()?;

    let plan   = input.plan;
    let at_str = encode_dt(Utc::now());

    // Check-and-insert in one IMMEDIATE transaction; UNIQUE(customer_id)
    // backs it up at the schema level.
    let observed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !customer_exists(&tx, customer_id)? {
          return Ok(RawSubscribe::MissingCustomer);
        }

        let existing = query_subscriptions(
          &tx,
          "WHERE customer_id = ?1",
          rusqlite::params![customer_id],
        )?
        .into_iter()
        .next();
        if let Some(existing) = existing {
          return Ok(RawSubscribe::Conflict(existing));
        }

        tx.execute(
          "INSERT INTO subscriptions (customer_id, plan, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![customer_id, plan, at_str],
        )?;

        let customer = query_customers(
          &tx,
          "WHERE c.customer_id = ?1",
          rusqlite::params![customer_id],
        )?
        .into_iter()
        .next()
        .ok_or(rusqlite::Error::QueryReturnedNoRows)?;

        tx.commit()?;
        Ok(RawSubscribe::Subscribed(customer))
      })
      .await?;

    match observed {
      RawSubscribe::MissingCustomer => {
        Err(netflix_core::Error::CustomerNotFound(customer_id).into())
      }
      RawSubscribe::Conflict(existing) => {
        tracing::debug!(customer_id, "customer already holds a subscription");
        Ok(SubscriptionOutcome::Conflict(existing.into_subscription()?))
      }
      RawSubscribe::Subscribed(customer) => {
        tracing::debug!(customer_id, "attached subscription");
        Ok(SubscriptionOutcome::Subscribed(customer.into_customer()?))
      }
    }
  }

  async fn delete_subscription(&self, customer_id: i64) -> Result<()> {
    let outcome = self
      .conn
      .call(move |conn| {
        if !customer_exists(conn, customer_id)? {
          return Ok(ScopedDelete::MissingCustomer);
        }
        Ok(ScopedDelete::Deleted(conn.execute(
          "DELETE FROM subscriptions WHERE customer_id = ?1",
          rusqlite::params![customer_id],
        )?))
      })
      .await?;

    match outcome {
      ScopedDelete::MissingCustomer => {
        Err(netflix_core::Error::CustomerNotFound(customer_id).into())
      }
      ScopedDelete::Deleted(0) => {
        Err(netflix_core::Error::SubscriptionNotFound(customer_id).into())
      }
      ScopedDelete::Deleted(_) => {
        tracing::debug!(customer_id, "deleted subscription");
        Ok(())
      }
    }
  }
}
