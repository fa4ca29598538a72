//! # Domain Layer
//!
//! Configuration, chat and image request/response types, and the error enum.
//! This layer is independent of transport and console concerns.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
