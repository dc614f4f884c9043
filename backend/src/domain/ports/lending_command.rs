//! Driving port for the lending engine.

use async_trait::async_trait;

use crate::domain::book_item::BookItem;
use crate::domain::circulation::IssuedBookItem;
use crate::domain::context::ActorId;
use crate::domain::error::Error;
use crate::domain::fine::Fine;
use crate::domain::ids::{BookItemId, MemberId};

/// Request to borrow a book item for a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowRequest {
    pub actor: ActorId,
    pub book_item: BookItemId,
    pub member: MemberId,
}

/// Outcome of a successful borrow.
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowResponse {
    /// The newly opened issue with its computed due date.
    pub issue: IssuedBookItem,
}

/// Request to return a borrowed book item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRequest {
    pub actor: ActorId,
    pub book_item: BookItemId,
}

/// Outcome of a successful return.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnResponse {
    /// The closed issue with its returned date stamped.
    pub issue: IssuedBookItem,
    /// The fine accrued when the return was late.
    pub fine: Option<Fine>,
}

/// Request to report a book item lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLostRequest {
    pub actor: ActorId,
    pub book_item: BookItemId,
}

/// Outcome of reporting a book item lost.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLostResponse {
    /// The item in its terminal Lost state.
    pub item: BookItem,
}

/// Driving port covering the borrow/return/report-lost transitions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LendingCommand: Send + Sync {
    /// Borrow a book item for a member.
    async fn borrow(&self, request: BorrowRequest) -> Result<BorrowResponse, Error>;

    /// Return a borrowed book item, accruing a fine when late.
    async fn return_item(&self, request: ReturnRequest) -> Result<ReturnResponse, Error>;

    /// Report a book item lost to the library.
    async fn report_lost(&self, request: ReportLostRequest) -> Result<ReportLostResponse, Error>;

    /// Fines recorded against a book item, newest first.
    async fn fines_for_item(&self, actor: ActorId, item: BookItemId) -> Result<Vec<Fine>, Error>;
}
