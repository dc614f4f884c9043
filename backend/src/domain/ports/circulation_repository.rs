//! Port for the transactional circulation store.
//!
//! Each lending action computes its full record set in the domain and
//! hands it to the adapter as one commit payload; the adapter applies the
//! payload atomically. Commits carry the `BookItem` revision observed at
//! read time, and the adapter rejects stale revisions so concurrent
//! transitions on the same item serialise.

use async_trait::async_trait;

use crate::domain::book_item::BookItem;
use crate::domain::circulation::{IssuedBookItem, Reservation};
use crate::domain::context::LibraryScope;
use crate::domain::fine::Fine;
use crate::domain::ids::{BookItemId, MemberId, ReservationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by circulation repository adapters.
    pub enum CirculationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "circulation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "circulation repository query failed: {message}",
        /// The commit carried a stale book item revision.
        StaleRevision { item: String } =>
            "book item {item} was modified concurrently",
    }
}

/// Record set persisted atomically when a borrow succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowCommit {
    /// The item with status, holder fields, and revision advanced.
    pub item: BookItem,
    /// The newly opened issue.
    pub issue: IssuedBookItem,
    /// The fulfilled reservation, marked Completed, when borrowing a
    /// reserved item.
    pub completed_reservation: Option<Reservation>,
}

/// Record set persisted atomically when a return succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnCommit {
    /// The item back in circulation with the borrower cleared.
    pub item: BookItem,
    /// The issue closed with its returned date stamped.
    pub issue: IssuedBookItem,
    /// The fine accrued when the return was late.
    pub fine: Option<Fine>,
}

/// Record set persisted atomically when a reservation succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveCommit {
    /// The item with its reserver recorded.
    pub item: BookItem,
    /// The new waiting reservation.
    pub reservation: Reservation,
}

/// Port for circulation reads and atomic transition commits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CirculationRepository: Send + Sync {
    /// Find a book item by id.
    async fn find_book_item(
        &self,
        scope: &LibraryScope,
        id: BookItemId,
    ) -> Result<Option<BookItem>, CirculationRepositoryError>;

    /// The open issue for (member, item), if one exists.
    async fn find_open_issue(
        &self,
        scope: &LibraryScope,
        member: MemberId,
        item: BookItemId,
    ) -> Result<Option<IssuedBookItem>, CirculationRepositoryError>;

    /// The member's waiting reservation on the item, if one exists.
    async fn find_waiting_reservation(
        &self,
        scope: &LibraryScope,
        member: MemberId,
        item: BookItemId,
    ) -> Result<Option<Reservation>, CirculationRepositoryError>;

    /// Find a reservation by id.
    async fn find_reservation(
        &self,
        scope: &LibraryScope,
        id: ReservationId,
    ) -> Result<Option<Reservation>, CirculationRepositoryError>;

    /// Fines recorded against a book item, newest first.
    async fn fines_for_item(
        &self,
        scope: &LibraryScope,
        item: BookItemId,
    ) -> Result<Vec<Fine>, CirculationRepositoryError>;

    /// Atomically persist a borrow transition.
    async fn commit_borrow(
        &self,
        scope: &LibraryScope,
        commit: BorrowCommit,
    ) -> Result<(), CirculationRepositoryError>;

    /// Atomically persist a return transition.
    async fn commit_return(
        &self,
        scope: &LibraryScope,
        commit: ReturnCommit,
    ) -> Result<(), CirculationRepositoryError>;

    /// Atomically persist a reserve transition.
    async fn commit_reserve(
        &self,
        scope: &LibraryScope,
        commit: ReserveCommit,
    ) -> Result<(), CirculationRepositoryError>;

    /// Persist a status-only item update (report-lost), revision checked.
    async fn update_book_item(
        &self,
        scope: &LibraryScope,
        item: BookItem,
    ) -> Result<(), CirculationRepositoryError>;

    /// Persist a reservation status update (cancellation).
    async fn update_reservation(
        &self,
        scope: &LibraryScope,
        reservation: Reservation,
    ) -> Result<(), CirculationRepositoryError>;
}
