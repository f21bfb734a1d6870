//! SQL schema for the SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS customers (
    customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    surname     TEXT NOT NULL,
    city        TEXT NOT NULL,
    dni         TEXT NOT NULL
);

-- At most one subscription per customer.
CREATE TABLE IF NOT EXISTS subscriptions (
    subscription_id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id     INTEGER NOT NULL
                    REFERENCES customers(customer_id) ON DELETE CASCADE,
    plan            TEXT NOT NULL,
    created_at      TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    UNIQUE (customer_id)
);

CREATE TABLE IF NOT EXISTS visuals (
    visual_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id      INTEGER NOT NULL
                     REFERENCES customers(customer_id) ON DELETE CASCADE,
    product_id       INTEGER NOT NULL,   -- opaque; no products table
    watched_at       TEXT NOT NULL,      -- RFC 3339 UTC
    duration_minutes INTEGER
);

CREATE INDEX IF NOT EXISTS customers_city_idx   ON customers(city);
CREATE INDEX IF NOT EXISTS customers_dni_idx    ON customers(dni);
CREATE INDEX IF NOT EXISTS visuals_customer_idx ON visuals(customer_id);

PRAGMA user_version = 1;
";
