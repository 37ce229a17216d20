//! OpenAPI schema definitions for domain and wire types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`, and the
//! user DTOs flatten an open-ended profile map that utoipa cannot describe
//! from the struct alone. The wrappers here describe those shapes for the
//! generated document only.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa when generating OpenAPI"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body could not be decoded.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No user has the requested id.
    #[schema(rename = "not_found")]
    NotFound,
    /// A user with the same name already exists.
    #[schema(rename = "conflict")]
    Conflict,
    /// The record store failed or timed out.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for the error envelope returned by every failing endpoint.
#[derive(ToSchema)]
#[schema(as = Error)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message. Internal errors are always redacted.
    #[schema(example = "User not found with ID: 65f1c0ffee0000000000beef")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for a stored user.
///
/// Any additional profile fields stored with the user are returned alongside
/// these.
#[derive(ToSchema)]
#[schema(as = User)]
pub struct UserSchema {
    /// Store-assigned identifier (24 hex characters).
    #[schema(example = "65f1c0ffee0000000000beef")]
    id: String,
    /// Copy of `id` kept as a queryable field.
    #[schema(example = "65f1c0ffee0000000000beef")]
    user_id: String,
    /// Unique display name.
    #[schema(example = "alice")]
    name: String,
}

/// OpenAPI schema for the create request body.
///
/// Every field other than `name` is stored verbatim. `id`, `_id` and
/// `user_id` are ignored.
#[derive(ToSchema)]
#[schema(as = NewUser)]
pub struct NewUserSchema {
    /// Unique display name; defaults to the empty string.
    #[schema(example = "alice")]
    name: Option<String>,
}
