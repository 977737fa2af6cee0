//! Data Transfer Objects for REST request/response serialization.
//!
//! Request fields are optional at the serde level so that a missing field
//! becomes a 400 validation error with our error body, not an extractor
//! rejection.

pub mod publish_dto;
pub mod subscription_dto;

pub use publish_dto::*;
pub use subscription_dto::*;

use crate::error::GatewayError;

/// Returns the field value or an `InvalidRequest` naming the field.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when `value` is `None`.
pub fn required(field: &str, value: Option<String>) -> Result<String, GatewayError> {
    value.ok_or_else(|| GatewayError::InvalidRequest(format!("{field} is required")))
}
