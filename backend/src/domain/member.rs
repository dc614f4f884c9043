//! Library members (patrons).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{LibraryId, MemberId};

/// A patron registered with one library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub library: LibraryId,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub registered_on: DateTime<Utc>,
    pub removed_on: Option<DateTime<Utc>>,
    pub active: bool,
}
