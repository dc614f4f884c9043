//! Circulation HTTP handlers.
//!
//! ```text
//! POST /api/v1/book-items/{id}/borrow       Borrow a book item
//! POST /api/v1/book-items/{id}/return       Return a borrowed item
//! POST /api/v1/book-items/{id}/report-lost  Report an item lost
//! POST /api/v1/book-items/{id}/reserve      Place a hold on an item
//! POST /api/v1/reservations/{id}/cancel     Cancel a waiting hold
//! GET  /api/v1/book-items/{id}/fines        List fines raised against an item
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    BorrowRequest, CancelReservationRequest, ReportLostRequest, ReserveRequest, ReturnRequest,
};
use crate::domain::{
    BookItem, BookItemStatus, Fine, IssuedBookItem, Reservation, ReservationStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::actor_id;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body naming the member a circulation action applies to.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberRefBody {
    /// Guid of the member borrowing or reserving the item.
    #[schema(value_type = uuid::Uuid)]
    pub member_id: crate::domain::MemberId,
}

/// Lending transaction returned by borrow and return actions.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::IssueId,
    #[schema(value_type = uuid::Uuid)]
    pub book_item: crate::domain::BookItemId,
    #[schema(value_type = uuid::Uuid)]
    pub member: crate::domain::MemberId,
    #[schema(format = "date-time", value_type = String)]
    pub borrowed_date: DateTime<Utc>,
    #[schema(format = "date-time", value_type = String)]
    pub due_date: DateTime<Utc>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub returned_date: Option<DateTime<Utc>>,
}

impl From<IssuedBookItem> for IssueBody {
    fn from(issue: IssuedBookItem) -> Self {
        Self {
            id: issue.id,
            book_item: issue.book_item,
            member: issue.member,
            borrowed_date: issue.borrowed_date,
            due_date: issue.due_date,
            returned_date: issue.returned_date,
        }
    }
}

/// Fine created by a late return.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FineBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::FineId,
    #[schema(value_type = uuid::Uuid)]
    pub book_item: crate::domain::BookItemId,
    #[schema(value_type = uuid::Uuid)]
    pub member: crate::domain::MemberId,
    #[schema(format = "date-time", value_type = String)]
    pub due_date: DateTime<Utc>,
    #[schema(format = "date-time", value_type = String)]
    pub returned_date: DateTime<Utc>,
    /// Decimal amount rendered as a string, e.g. `"6.00"`.
    #[schema(value_type = String, example = "6.00")]
    pub amount: Decimal,
}

impl From<Fine> for FineBody {
    fn from(fine: Fine) -> Self {
        Self {
            id: fine.id,
            book_item: fine.book_item,
            member: fine.member,
            due_date: fine.due_date,
            returned_date: fine.returned_date,
            amount: fine.amount,
        }
    }
}

/// Return action outcome: the closed issue plus any fine.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBody {
    pub issue: IssueBody,
    pub fine: Option<FineBody>,
}

/// Book item snapshot returned by the report-lost action.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookItemBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::BookItemId,
    #[schema(value_type = uuid::Uuid)]
    pub book: crate::domain::BookId,
    pub barcode: String,
    #[schema(value_type = String, example = "Lost")]
    pub status: BookItemStatus,
    #[schema(value_type = Option<uuid::Uuid>)]
    pub borrowed_by: Option<crate::domain::MemberId>,
    #[schema(value_type = Option<uuid::Uuid>)]
    pub reserved_by: Option<crate::domain::MemberId>,
}

impl From<BookItem> for BookItemBody {
    fn from(item: BookItem) -> Self {
        Self {
            id: item.id,
            book: item.book,
            barcode: item.barcode,
            status: item.status,
            borrowed_by: item.borrowed_by,
            reserved_by: item.reserved_by,
        }
    }
}

/// Hold placed on a book item.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::ReservationId,
    #[schema(value_type = uuid::Uuid)]
    pub book_item: crate::domain::BookItemId,
    #[schema(value_type = uuid::Uuid)]
    pub member: crate::domain::MemberId,
    #[schema(format = "date-time", value_type = String)]
    pub reserved_on: DateTime<Utc>,
    #[schema(value_type = String, example = "Waiting")]
    pub status: ReservationStatus,
}

impl From<Reservation> for ReservationBody {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            book_item: reservation.book_item,
            member: reservation.member,
            reserved_on: reservation.reserved_on,
            status: reservation.status,
        }
    }
}

/// Borrow a book item for a member.
#[utoipa::path(
    post,
    path = "/api/v1/book-items/{id}/borrow",
    request_body = MemberRefBody,
    responses(
        (status = 201, description = "Issue opened", body = IssueBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Book item not found", body = ErrorSchema),
        (status = 409, description = "Item state forbids borrowing", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Book item guid")),
    tags = ["circulation"],
    operation_id = "borrowBookItem"
)]
#[post("/book-items/{id}/borrow")]
pub async fn borrow_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<MemberRefBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let response = state
        .lending
        .borrow(BorrowRequest {
            actor,
            book_item: path.into_inner().into(),
            member: payload.into_inner().member_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(IssueBody::from(response.issue)))
}

/// Return a borrowed book item, fining a late return.
#[utoipa::path(
    post,
    path = "/api/v1/book-items/{id}/return",
    responses(
        (status = 200, description = "Issue closed", body = ReturnBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Book item not found", body = ErrorSchema),
        (status = 409, description = "Item is not borrowed", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Book item guid")),
    tags = ["circulation"],
    operation_id = "returnBookItem"
)]
#[post("/book-items/{id}/return")]
pub async fn return_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let response = state
        .lending
        .return_item(ReturnRequest {
            actor,
            book_item: path.into_inner().into(),
        })
        .await?;
    let body = ReturnBody {
        issue: IssueBody::from(response.issue),
        fine: response.fine.map(FineBody::from),
    };
    Ok(HttpResponse::Ok().json(body))
}

/// Report a book item lost to the library.
#[utoipa::path(
    post,
    path = "/api/v1/book-items/{id}/report-lost",
    responses(
        (status = 200, description = "Item marked lost", body = BookItemBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Book item not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Book item guid")),
    tags = ["circulation"],
    operation_id = "reportBookItemLost"
)]
#[post("/book-items/{id}/report-lost")]
pub async fn report_lost(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let response = state
        .lending
        .report_lost(ReportLostRequest {
            actor,
            book_item: path.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Ok().json(BookItemBody::from(response.item)))
}

/// Place a hold on a book item for a member.
#[utoipa::path(
    post,
    path = "/api/v1/book-items/{id}/reserve",
    request_body = MemberRefBody,
    responses(
        (status = 201, description = "Reservation created", body = ReservationBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Book item not found", body = ErrorSchema),
        (status = 409, description = "Item state forbids reserving", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Book item guid")),
    tags = ["circulation"],
    operation_id = "reserveBookItem"
)]
#[post("/book-items/{id}/reserve")]
pub async fn reserve_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<MemberRefBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let response = state
        .reservations
        .reserve(ReserveRequest {
            actor,
            book_item: path.into_inner().into(),
            member: payload.into_inner().member_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(ReservationBody::from(response.reservation)))
}

/// Cancel a waiting reservation.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Reservation not found", body = ErrorSchema),
        (status = 409, description = "Reservation is not waiting", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Reservation guid")),
    tags = ["circulation"],
    operation_id = "cancelReservation"
)]
#[post("/reservations/{id}/cancel")]
pub async fn cancel_reservation(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let response = state
        .reservations
        .cancel_reservation(CancelReservationRequest {
            actor,
            reservation: path.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Ok().json(ReservationBody::from(response.reservation)))
}

/// List the fines raised against a book item, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/book-items/{id}/fines",
    responses(
        (status = 200, description = "Fine history for the item", body = [FineBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Book item not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Book item guid")),
    tags = ["circulation"],
    operation_id = "listBookItemFines"
)]
#[get("/book-items/{id}/fines")]
pub async fn list_item_fines(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let fines = state
        .lending
        .fines_for_item(actor, path.into_inner().into())
        .await?;
    let body: Vec<FineBody> = fines.into_iter().map(FineBody::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
#[path = "circulation_tests.rs"]
mod tests;
