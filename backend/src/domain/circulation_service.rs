//! Lending engine: the state machine on a book item's status.
//!
//! Each action resolves the acting library, reads the wall clock once,
//! computes the full record set for the transition, and hands it to the
//! circulation store as a single atomic commit. A commit that loses a
//! concurrent race surfaces [`Error::ConcurrentUpdate`]; every other
//! failure is a non-retryable business-rule violation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::info;

use crate::domain::book_item::{BookItem, BookItemStatus};
use crate::domain::circulation::{IssuedBookItem, Reservation, ReservationStatus};
use crate::domain::context::{ActorId, LibraryScope};
use crate::domain::error::Error;
use crate::domain::fine::Fine;
use crate::domain::ids::{BookItemId, FineId, IssueId, MemberId};
use crate::domain::ports::{
    BorrowCommit, BorrowRequest, BorrowResponse, CirculationRepository,
    CirculationRepositoryError, LendingCommand, LibraryRepository, LibraryRepositoryError,
    ReportLostRequest, ReportLostResponse, ReturnCommit, ReturnRequest, ReturnResponse,
};

pub(super) fn map_repository_error(error: CirculationRepositoryError) -> Error {
    match error {
        CirculationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("circulation repository unavailable: {message}"))
        }
        CirculationRepositoryError::Query { message } => {
            Error::internal(format!("circulation repository error: {message}"))
        }
        CirculationRepositoryError::StaleRevision { .. } => Error::ConcurrentUpdate,
    }
}

pub(super) fn map_settings_error(error: LibraryRepositoryError) -> Error {
    match error {
        LibraryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("library repository unavailable: {message}"))
        }
        other => Error::internal(format!("settings lookup failed: {other}")),
    }
}

/// Service implementing the [`LendingCommand`] driving port.
#[derive(Clone)]
pub struct CirculationService<L, C> {
    library_repo: Arc<L>,
    circulation_repo: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<L, C> CirculationService<L, C> {
    /// Create the service with its repositories and wall clock.
    pub fn new(library_repo: Arc<L>, circulation_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            library_repo,
            circulation_repo,
            clock,
        }
    }
}

impl<L, C> CirculationService<L, C>
where
    L: LibraryRepository,
    C: CirculationRepository,
{
    async fn scope_for(&self, actor: &ActorId) -> Result<LibraryScope, Error> {
        LibraryScope::resolve(self.library_repo.as_ref(), actor).await
    }

    async fn item_or_not_found(
        &self,
        scope: &LibraryScope,
        id: BookItemId,
    ) -> Result<BookItem, Error> {
        self.circulation_repo
            .find_book_item(scope, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("book item", id))
    }

    async fn due_date(
        &self,
        scope: &LibraryScope,
        borrowed_date: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, Error> {
        let settings = self
            .library_repo
            .active_borrowing_settings(scope)
            .await
            .map_err(map_settings_error)?
            .ok_or(Error::NoBorrowingSettings)?;
        settings.due_date_from(borrowed_date)
    }

    async fn fine_for_late_return(
        &self,
        scope: &LibraryScope,
        member: MemberId,
        item: BookItemId,
        due_date: DateTime<Utc>,
        returned_date: DateTime<Utc>,
    ) -> Result<Option<Fine>, Error> {
        if returned_date <= due_date {
            return Ok(None);
        }
        let settings = self
            .library_repo
            .active_fine_settings(scope)
            .await
            .map_err(map_settings_error)?
            .ok_or(Error::NoFineSettings)?;
        let fine = Fine {
            id: FineId::random(),
            library: scope.library(),
            member,
            book_item: item,
            due_date,
            returned_date,
            amount: settings.amount_for(due_date, returned_date),
        };
        info!(item = %item, member = %member, amount = %fine.amount, "late return fined");
        Ok(Some(fine))
    }

    /// The reservation a borrow from `Reserved` fulfils, marked Completed.
    async fn fulfilled_reservation(
        &self,
        scope: &LibraryScope,
        member: MemberId,
        item: BookItemId,
    ) -> Result<Reservation, Error> {
        let mut reservation = self
            .circulation_repo
            .find_waiting_reservation(scope, member, item)
            .await
            .map_err(map_repository_error)?
            .ok_or(Error::NoWaitingReservation)?;
        reservation.status = ReservationStatus::Completed;
        Ok(reservation)
    }
}

#[async_trait]
impl<L, C> LendingCommand for CirculationService<L, C>
where
    L: LibraryRepository,
    C: CirculationRepository,
{
    async fn borrow(&self, request: BorrowRequest) -> Result<BorrowResponse, Error> {
        let scope = self.scope_for(&request.actor).await?;
        let item = self.item_or_not_found(&scope, request.book_item).await?;

        let open_issue = self
            .circulation_repo
            .find_open_issue(&scope, request.member, item.id)
            .await
            .map_err(map_repository_error)?;
        if open_issue.is_some() {
            return Err(Error::DuplicateOpenIssue);
        }

        let completed_reservation = match item.status {
            BookItemStatus::Available => None,
            BookItemStatus::Reserved => Some(
                self.fulfilled_reservation(&scope, request.member, item.id)
                    .await?,
            ),
            BookItemStatus::Borrowed => return Err(Error::AlreadyBorrowed),
            BookItemStatus::Lost => return Err(Error::ItemLost),
        };

        let borrowed_date = self.clock.utc();
        let due_date = self.due_date(&scope, borrowed_date).await?;

        let mut updated = item;
        updated.status = BookItemStatus::Borrowed;
        updated.borrowed_by = Some(request.member);
        updated.reserved_by = None;
        updated.revision += 1;
        updated.validate_holder_invariant()?;

        let issue = IssuedBookItem {
            id: IssueId::random(),
            library: scope.library(),
            member: request.member,
            book_item: updated.id,
            borrowed_date,
            due_date,
            returned_date: None,
        };

        self.circulation_repo
            .commit_borrow(
                &scope,
                BorrowCommit {
                    item: updated,
                    issue: issue.clone(),
                    completed_reservation,
                },
            )
            .await
            .map_err(map_repository_error)?;

        info!(item = %issue.book_item, member = %issue.member, due = %issue.due_date, "book item borrowed");
        Ok(BorrowResponse { issue })
    }

    async fn return_item(&self, request: ReturnRequest) -> Result<ReturnResponse, Error> {
        let scope = self.scope_for(&request.actor).await?;
        let item = self.item_or_not_found(&scope, request.book_item).await?;

        if item.status != BookItemStatus::Borrowed {
            return Err(Error::NotBorrowed);
        }
        let borrower = item
            .borrowed_by
            .ok_or_else(|| Error::invalid_state("borrowed book item has no recorded borrower"))?;

        let mut issue = self
            .circulation_repo
            .find_open_issue(&scope, borrower, item.id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::invalid_state("borrowed book item has no open issue"))?;

        let returned_date = self.clock.utc();
        issue.returned_date = Some(returned_date);

        let fine = self
            .fine_for_late_return(&scope, borrower, item.id, issue.due_date, returned_date)
            .await?;

        let mut updated = item;
        updated.status = BookItemStatus::Available;
        updated.borrowed_by = None;
        updated.revision += 1;

        self.circulation_repo
            .commit_return(
                &scope,
                ReturnCommit {
                    item: updated,
                    issue: issue.clone(),
                    fine: fine.clone(),
                },
            )
            .await
            .map_err(map_repository_error)?;

        info!(item = %issue.book_item, member = %issue.member, fined = fine.is_some(), "book item returned");
        Ok(ReturnResponse { issue, fine })
    }

    async fn report_lost(&self, request: ReportLostRequest) -> Result<ReportLostResponse, Error> {
        let scope = self.scope_for(&request.actor).await?;
        let item = self.item_or_not_found(&scope, request.book_item).await?;

        // Unconditional from any state; Lost is terminal. Holder fields
        // stay as they were so the last known holder remains on record.
        let mut updated = item;
        updated.status = BookItemStatus::Lost;
        updated.revision += 1;

        self.circulation_repo
            .update_book_item(&scope, updated.clone())
            .await
            .map_err(map_repository_error)?;

        info!(item = %updated.id, "book item reported lost");
        Ok(ReportLostResponse { item: updated })
    }

    async fn fines_for_item(&self, actor: ActorId, item: BookItemId) -> Result<Vec<Fine>, Error> {
        let scope = self.scope_for(&actor).await?;
        self.item_or_not_found(&scope, item).await?;
        self.circulation_repo
            .fines_for_item(&scope, item)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "circulation_service_tests.rs"]
mod tests;
