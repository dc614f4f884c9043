//! Book items: the circulating copies the lending engine operates on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::ids::{BookId, BookItemId, LibraryId, MemberId};

/// Lifecycle state of a circulating copy.
///
/// `Available` is the initial state; `Lost` is terminal — no action
/// returns a lost item to circulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookItemStatus {
    #[default]
    Available,
    Reserved,
    Borrowed,
    Lost,
}

/// A single circulating copy of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookItem {
    pub id: BookItemId,
    pub library: LibraryId,
    pub book: BookId,
    /// System-generated at creation; unique per item.
    pub barcode: String,
    pub status: BookItemStatus,
    pub borrowed_by: Option<MemberId>,
    pub reserved_by: Option<MemberId>,
    /// Optimistic-concurrency counter; the store rejects commits carrying
    /// a stale revision so concurrent transitions serialise.
    pub revision: u64,
    pub active: bool,
}

impl BookItem {
    /// Generate a barcode from a time-derived six-digit suffix.
    ///
    /// Matches the original scheme (fixed tag plus the trailing digits of
    /// the wall clock); collisions are accepted as negligible.
    pub fn generate_barcode(now: DateTime<Utc>) -> String {
        let micros = now.timestamp_micros().rem_euclid(1_000_000);
        format!("BAR-{micros:06}")
    }

    /// Check that status and holder fields agree.
    ///
    /// `Borrowed` requires `borrowed_by`; `Reserved` requires
    /// `reserved_by`. Runs before every commit so the invariant holds for
    /// all persisted items.
    pub fn validate_holder_invariant(&self) -> Result<(), Error> {
        match self.status {
            BookItemStatus::Borrowed if self.borrowed_by.is_none() => Err(Error::invalid_state(
                "a borrowed book item must record the borrowing member",
            )),
            BookItemStatus::Reserved if self.reserved_by.is_none() => Err(Error::invalid_state(
                "a reserved book item must record the reserving member",
            )),
            _ => Ok(()),
        }
    }
}
