//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// JSON error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest
        | ErrorCode::NoLibraryAssigned
        | ErrorCode::AmbiguousLibraryAssignment
        | ErrorCode::UnsupportedDurationType => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyBorrowed
        | ErrorCode::ItemLost
        | ErrorCode::NotBorrowed
        | ErrorCode::NoWaitingReservation
        | ErrorCode::DuplicateOpenIssue
        | ErrorCode::NoBorrowingSettings
        | ErrorCode::NoFineSettings
        | ErrorCode::CannotReserveLostItem
        | ErrorCode::DuplicateWaitingReservation
        | ErrorCode::SelfReservationConflict
        | ErrorCode::ConcurrentUpdate
        | ErrorCode::RecordInUse
        | ErrorCode::InvalidStateInvariant => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> ErrorBody {
    let code = error.code();
    // Internal messages carry adapter detail that must not reach clients.
    let message = if matches!(code, ErrorCode::InternalError) {
        "Internal server error".to_owned()
    } else {
        error.to_string()
    };
    ErrorBody { code, message }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(body_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
