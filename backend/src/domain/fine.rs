//! Fines accrued on late returns.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{BookItemId, FineId, LibraryId, MemberId};

/// Monetary penalty created as a side effect of a late return.
///
/// Computed once at return time from the library's active
/// [`crate::domain::FineSettings`] and never mutated afterwards; no update
/// or cancellation action exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fine {
    pub id: FineId,
    pub library: LibraryId,
    pub member: MemberId,
    pub book_item: BookItemId,
    pub due_date: DateTime<Utc>,
    pub returned_date: DateTime<Utc>,
    pub amount: Decimal,
}
