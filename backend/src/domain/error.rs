//! Domain-level error type.
//!
//! Every business-rule violation the engines can raise is a variant here,
//! so callers match exhaustively and inbound adapters map each kind to a
//! transport-specific response. The type is transport agnostic.

use serde::Serialize;
use thiserror::Error;

/// Stable machine-readable code identifying each failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NoLibraryAssigned,
    AmbiguousLibraryAssignment,
    InvalidStateInvariant,
    AlreadyBorrowed,
    ItemLost,
    NotBorrowed,
    NoWaitingReservation,
    DuplicateOpenIssue,
    NoBorrowingSettings,
    NoFineSettings,
    UnsupportedDurationType,
    CannotReserveLostItem,
    DuplicateWaitingReservation,
    SelfReservationConflict,
    ConcurrentUpdate,
    RecordInUse,
    NotFound,
    InvalidRequest,
    ServiceUnavailable,
    InternalError,
}

/// Failures surfaced by the lending, reservation, and fine engines.
///
/// The first fourteen variants are non-retryable business-rule violations
/// that abort the enclosing action and reach the caller unchanged.
/// [`Error::ConcurrentUpdate`] is the single retryable kind: it means an
/// optimistic-concurrency check lost a race and the caller should re-read
/// and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The acting user is not assigned to any active library.
    #[error("the acting user is not assigned to an active library")]
    NoLibraryAssigned,
    /// The acting user is assigned to more than one active library.
    #[error("the acting user is assigned to more than one active library")]
    AmbiguousLibraryAssignment,
    /// A book item's status disagrees with its borrower/reserver fields.
    #[error("book item state invariant violated: {message}")]
    InvalidStateInvariant { message: String },
    /// The book item is already borrowed by another member.
    #[error("the book item is already borrowed by another member")]
    AlreadyBorrowed,
    /// The book item is lost to the library.
    #[error("the book item is lost to the library")]
    ItemLost,
    /// Only a borrowed book item can be returned.
    #[error("only a borrowed book item can be returned")]
    NotBorrowed,
    /// The member holds no waiting reservation on the book item.
    #[error("the member has no waiting reservation for this book item")]
    NoWaitingReservation,
    /// An open issue already exists for this member and book item.
    #[error("this book item has already been issued to this member")]
    DuplicateOpenIssue,
    /// The library has no active borrowing settings.
    #[error("the library has no active borrowing settings")]
    NoBorrowingSettings,
    /// The library has no active fine settings.
    #[error("the library has no active fine settings")]
    NoFineSettings,
    /// The configured calendar band is not implemented.
    #[error("duration type {value} is not supported")]
    UnsupportedDurationType { value: String },
    /// Lost book items cannot be reserved.
    #[error("a book item lost to the library cannot be reserved")]
    CannotReserveLostItem,
    /// The member already holds a waiting reservation on the book item.
    #[error("the member already has a waiting reservation for this book item")]
    DuplicateWaitingReservation,
    /// The member currently has the book item on loan.
    #[error("the member has this book item on loan; return it before reserving")]
    SelfReservationConflict,
    /// The book item changed under the action; re-read and retry.
    #[error("the book item was modified concurrently; retry the action")]
    ConcurrentUpdate,
    /// The record is referenced by other records and cannot be deleted.
    #[error("the record is referenced by other records and cannot be deleted")]
    RecordInUse,
    /// The referenced record does not exist in the acting library's scope.
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: String },
    /// The request payload failed validation before reaching an engine.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
    /// A driven adapter is unavailable.
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String },
    /// An unexpected failure inside the domain or an adapter.
    #[error("internal error: {message}")]
    InternalError { message: String },
}

impl Error {
    /// Stable machine-readable code for this failure.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NoLibraryAssigned => ErrorCode::NoLibraryAssigned,
            Self::AmbiguousLibraryAssignment => ErrorCode::AmbiguousLibraryAssignment,
            Self::InvalidStateInvariant { .. } => ErrorCode::InvalidStateInvariant,
            Self::AlreadyBorrowed => ErrorCode::AlreadyBorrowed,
            Self::ItemLost => ErrorCode::ItemLost,
            Self::NotBorrowed => ErrorCode::NotBorrowed,
            Self::NoWaitingReservation => ErrorCode::NoWaitingReservation,
            Self::DuplicateOpenIssue => ErrorCode::DuplicateOpenIssue,
            Self::NoBorrowingSettings => ErrorCode::NoBorrowingSettings,
            Self::NoFineSettings => ErrorCode::NoFineSettings,
            Self::UnsupportedDurationType { .. } => ErrorCode::UnsupportedDurationType,
            Self::CannotReserveLostItem => ErrorCode::CannotReserveLostItem,
            Self::DuplicateWaitingReservation => ErrorCode::DuplicateWaitingReservation,
            Self::SelfReservationConflict => ErrorCode::SelfReservationConflict,
            Self::ConcurrentUpdate => ErrorCode::ConcurrentUpdate,
            Self::RecordInUse => ErrorCode::RecordInUse,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            Self::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
            Self::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Convenience constructor for [`Error::InvalidStateInvariant`].
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidStateInvariant {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
