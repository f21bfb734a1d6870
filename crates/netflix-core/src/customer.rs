//! Customer — the aggregate that owns a subscription and viewing records.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, subscription::Subscription};

/// A persisted customer.
///
/// `subscription` is the customer's single active plan, if any. Viewing
/// records are not embedded; they are listed through the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
  pub id:           i64,
  pub name:         String,
  pub surname:      String,
  pub city:         String,
  pub dni:          String,
  #[serde(default)]
  pub subscription: Option<Subscription>,
}

/// Input for creating or replacing a customer. Ids are always assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
  pub name:    String,
  pub surname: String,
  pub city:    String,
  pub dni:     String,
}

impl NewCustomer {
  pub fn new(
    name: impl Into<String>,
    surname: impl Into<String>,
    city: impl Into<String>,
    dni: impl Into<String>,
  ) -> Self {
    Self {
      name:    name.into(),
      surname: surname.into(),
      city:    city.into(),
      dni:     dni.into(),
    }
  }

  /// Reject blank required fields.
  pub fn validate(&self) -> Result<()> {
    let fields = [
      ("name", &self.name),
      ("surname", &self.surname),
      ("city", &self.city),
      ("dni", &self.dni),
    ];
    for (field, value) in fields {
      if value.trim().is_empty() {
        return Err(Error::Invalid(format!("customer {field} must not be blank")));
      }
    }
    Ok(())
  }
}
