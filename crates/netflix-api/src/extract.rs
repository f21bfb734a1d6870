//! Extractors whose rejections render as [`ApiError`] JSON bodies, plus the
//! prefixed id segments used by the visual and subscription routes.

use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Deserializer, de::Error as _};

use crate::error::ApiError;

/// [`axum::extract::Path`] with an [`ApiError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// [`axum::Json`] request body with an [`ApiError`] rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// A path segment of the form `<TAG><integer>`, e.g. `c42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tagged<const TAG: char>(pub i64);

pub type CustomerRef = Tagged<'c'>;
pub type ProductRef = Tagged<'p'>;
pub type VisualRef = Tagged<'v'>;

impl<const TAG: char> Tagged<TAG> {
  pub fn parse(segment: &str) -> Option<Self> {
    let digits = segment.strip_prefix(TAG)?;
    if digits.starts_with(['+', '-']) {
      return None;
    }
    digits.parse().ok().map(Self)
  }
}

impl<'de, const TAG: char> Deserialize<'de> for Tagged<TAG> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let segment = String::deserialize(deserializer)?;
    Self::parse(&segment).ok_or_else(|| {
      D::Error::custom(format!("expected `{}<id>`, got {:?}", TAG, segment))
    })
  }
}
