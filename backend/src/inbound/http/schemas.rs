//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their structure for documentation purposes only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Documents the representative codes; the full set is in the domain
/// enum and every value serialises as snake_case.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode, rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The acting user is not assigned to an active library.
    NoLibraryAssigned,
    /// The requested resource does not exist in the acting scope.
    NotFound,
    /// The action conflicts with the book item's current state.
    AlreadyBorrowed,
    /// The action lost a concurrent race; re-read and retry.
    ConcurrentUpdate,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// OpenAPI schema for the JSON error payload.
#[derive(ToSchema)]
#[schema(as = crate::inbound::http::error::ErrorBody)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "already_borrowed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "the book item is already borrowed by another member")]
    message: String,
}
