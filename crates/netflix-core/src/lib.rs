//! Core types and trait definitions for the Netflix customers service.
//!
//! This crate is free of HTTP and database dependencies. The API layer and
//! storage backends both depend on it.

pub mod customer;
pub mod error;
pub mod service;
pub mod subscription;
pub mod visual;

pub use error::{Error, ErrorKind, Result, ServiceError};
