//! Error types for `netflix-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("customer not found: {0}")]
  CustomerNotFound(i64),

  #[error("customer {0} has no subscription")]
  SubscriptionNotFound(i64),

  #[error("visual {visual_id} not found for customer {customer_id}")]
  VisualNotFound { customer_id: i64, visual_id: i64 },

  #[error("invalid input: {0}")]
  Invalid(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse failure category that the HTTP layer maps onto a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Conflict,
  Invalid,
  Internal,
}

/// Implemented by every [`CustomerService`](crate::service::CustomerService)
/// error so callers can classify failures without knowing the backend.
pub trait ServiceError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

impl ServiceError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::CustomerNotFound(_)
      | Error::SubscriptionNotFound(_)
      | Error::VisualNotFound { .. } => ErrorKind::NotFound,
      Error::Invalid(_) => ErrorKind::Invalid,
    }
  }
}
