//! Circulation records: issues and reservations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BookItemId, IssueId, LibraryId, MemberId, ReservationId};

/// One lending transaction linking a member and a book item.
///
/// Open while `returned_date` is unset; at most one open issue may exist
/// per (member, book item) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedBookItem {
    pub id: IssueId,
    pub library: LibraryId,
    pub member: MemberId,
    pub book_item: BookItemId,
    pub borrowed_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
}

impl IssuedBookItem {
    /// Whether the loan is still outstanding.
    pub const fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }
}

/// State of a member's hold on a book item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[default]
    Waiting,
    Completed,
    Cancelled,
}

/// A member's hold on a book item.
///
/// A member holds at most one `Waiting` reservation per book item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub library: LibraryId,
    pub book_item: BookItemId,
    pub member: MemberId,
    pub reserved_on: DateTime<Utc>,
    pub status: ReservationStatus,
}
