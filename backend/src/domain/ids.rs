//! Typed record identifiers.
//!
//! Every persisted record carries a process-generated guid used as its
//! stable external reference, independent of whatever primary key the
//! storage adapter uses internally. Each entity gets its own newtype so
//! identifiers cannot be mixed up across entities.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub const fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_record_id!(
    /// Guid of a [`crate::domain::Library`].
    LibraryId
);
define_record_id!(
    /// Guid of an [`crate::domain::Author`].
    AuthorId
);
define_record_id!(
    /// Guid of a [`crate::domain::Book`].
    BookId
);
define_record_id!(
    /// Guid of a [`crate::domain::BookItem`].
    BookItemId
);
define_record_id!(
    /// Guid of a [`crate::domain::Member`].
    MemberId
);
define_record_id!(
    /// Guid of an [`crate::domain::IssuedBookItem`].
    IssueId
);
define_record_id!(
    /// Guid of a [`crate::domain::Reservation`].
    ReservationId
);
define_record_id!(
    /// Guid of a [`crate::domain::Fine`].
    FineId
);
define_record_id!(
    /// Guid of a [`crate::domain::BorrowingSettings`] row.
    BorrowingSettingsId
);
define_record_id!(
    /// Guid of a [`crate::domain::FineSettings`] row.
    FineSettingsId
);
