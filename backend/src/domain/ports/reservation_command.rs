//! Driving port for the reservation engine.

use async_trait::async_trait;

use crate::domain::circulation::Reservation;
use crate::domain::context::ActorId;
use crate::domain::error::Error;
use crate::domain::ids::{BookItemId, MemberId, ReservationId};

/// Request to place a hold on a book item for a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveRequest {
    pub actor: ActorId,
    pub book_item: BookItemId,
    pub member: MemberId,
}

/// Outcome of a successful reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveResponse {
    /// The new waiting reservation.
    pub reservation: Reservation,
}

/// Request to cancel a waiting reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelReservationRequest {
    pub actor: ActorId,
    pub reservation: ReservationId,
}

/// Outcome of a successful cancellation.
#[derive(Debug, Clone, PartialEq)]
pub struct CancelReservationResponse {
    /// The reservation in its Cancelled state.
    pub reservation: Reservation,
}

/// Driving port covering reserve and cancel-reservation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationCommand: Send + Sync {
    /// Place a hold on a book item.
    async fn reserve(&self, request: ReserveRequest) -> Result<ReserveResponse, Error>;

    /// Cancel a waiting reservation; no other side effects.
    async fn cancel_reservation(
        &self,
        request: CancelReservationRequest,
    ) -> Result<CancelReservationResponse, Error>;
}
