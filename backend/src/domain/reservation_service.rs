//! Reservation engine: holds on book items and their validation rules.
//!
//! Validation fires before the atomic commit, so a failed rule leaves no
//! partial state. Whether a member may reserve an item someone else has
//! on loan is a configured policy, not a hard-coded rule: the system this
//! replaces forced such items straight to Reserved without releasing the
//! borrower, and some deployments rely on that.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::book_item::BookItemStatus;
use crate::domain::circulation::{Reservation, ReservationStatus};
use crate::domain::context::LibraryScope;
use crate::domain::error::Error;
use crate::domain::ids::ReservationId;
use crate::domain::ports::{
    CancelReservationRequest, CancelReservationResponse, CirculationRepository, LibraryRepository,
    ReservationCommand, ReserveCommit, ReserveRequest, ReserveResponse,
};

use super::circulation_service::map_repository_error;

/// How to treat a reserve action on an item currently on loan to another
/// member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservePolicy {
    /// Reject with [`Error::AlreadyBorrowed`]; the item must come back
    /// before it can be held.
    #[default]
    RequireNotBorrowed,
    /// Legacy behaviour: force the item to Reserved while the borrower
    /// keeps it. The open issue is untouched.
    AllowOverBorrowed,
}

/// Service implementing the [`ReservationCommand`] driving port.
#[derive(Clone)]
pub struct ReservationService<L, C> {
    library_repo: Arc<L>,
    circulation_repo: Arc<C>,
    clock: Arc<dyn Clock>,
    policy: ReservePolicy,
}

impl<L, C> ReservationService<L, C> {
    /// Create the service with its repositories, wall clock, and policy.
    pub fn new(
        library_repo: Arc<L>,
        circulation_repo: Arc<C>,
        clock: Arc<dyn Clock>,
        policy: ReservePolicy,
    ) -> Self {
        Self {
            library_repo,
            circulation_repo,
            clock,
            policy,
        }
    }
}

#[async_trait]
impl<L, C> ReservationCommand for ReservationService<L, C>
where
    L: LibraryRepository,
    C: CirculationRepository,
{
    async fn reserve(&self, request: ReserveRequest) -> Result<ReserveResponse, Error> {
        let scope = LibraryScope::resolve(self.library_repo.as_ref(), &request.actor).await?;
        let item = self
            .circulation_repo
            .find_book_item(&scope, request.book_item)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("book item", request.book_item))?;

        if item.status == BookItemStatus::Lost {
            return Err(Error::CannotReserveLostItem);
        }

        let existing = self
            .circulation_repo
            .find_waiting_reservation(&scope, request.member, item.id)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::DuplicateWaitingReservation);
        }

        if item.status == BookItemStatus::Borrowed {
            if item.borrowed_by == Some(request.member) {
                return Err(Error::SelfReservationConflict);
            }
            if self.policy == ReservePolicy::RequireNotBorrowed {
                return Err(Error::AlreadyBorrowed);
            }
        }

        let reservation = Reservation {
            id: ReservationId::random(),
            library: scope.library(),
            book_item: item.id,
            member: request.member,
            reserved_on: self.clock.utc(),
            status: ReservationStatus::Waiting,
        };

        let mut updated = item;
        updated.status = BookItemStatus::Reserved;
        updated.reserved_by = Some(request.member);
        updated.revision += 1;
        updated.validate_holder_invariant()?;

        self.circulation_repo
            .commit_reserve(
                &scope,
                ReserveCommit {
                    item: updated,
                    reservation: reservation.clone(),
                },
            )
            .await
            .map_err(map_repository_error)?;

        info!(item = %reservation.book_item, member = %reservation.member, "book item reserved");
        Ok(ReserveResponse { reservation })
    }

    async fn cancel_reservation(
        &self,
        request: CancelReservationRequest,
    ) -> Result<CancelReservationResponse, Error> {
        let scope = LibraryScope::resolve(self.library_repo.as_ref(), &request.actor).await?;
        let mut reservation = self
            .circulation_repo
            .find_reservation(&scope, request.reservation)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("reservation", request.reservation))?;

        if reservation.status != ReservationStatus::Waiting {
            return Err(Error::NoWaitingReservation);
        }

        // Cancellation flips the reservation only; the book item keeps
        // whatever status it has.
        reservation.status = ReservationStatus::Cancelled;
        self.circulation_repo
            .update_reservation(&scope, reservation.clone())
            .await
            .map_err(map_repository_error)?;

        info!(reservation = %reservation.id, "reservation cancelled");
        Ok(CancelReservationResponse { reservation })
    }
}

#[cfg(test)]
#[path = "reservation_service_tests.rs"]
mod tests;
