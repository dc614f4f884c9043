//! Domain model, engines, and ports for the lending system.
//!
//! Entities are plain strongly typed records; the engines live in the
//! `*_service` modules and implement the driving ports in [`ports`].
//! Everything here is transport and storage agnostic.

pub mod book_item;
pub mod catalogue;
pub mod catalogue_service;
pub mod circulation;
pub mod circulation_service;
pub mod context;
pub mod error;
pub mod fine;
pub mod ids;
pub mod library;
pub mod library_service;
pub mod member;
pub mod member_service;
pub mod ports;
pub mod reservation_service;

pub use self::book_item::{BookItem, BookItemStatus};
pub use self::catalogue::{Author, Book, BookFormat, DEFAULT_BOOK_LANGUAGE};
pub use self::catalogue_service::CatalogueService;
pub use self::circulation::{IssuedBookItem, Reservation, ReservationStatus};
pub use self::circulation_service::CirculationService;
pub use self::context::{ActorId, LibraryScope};
pub use self::error::{Error, ErrorCode};
pub use self::fine::Fine;
pub use self::ids::{
    AuthorId, BookId, BookItemId, BorrowingSettingsId, FineId, FineSettingsId, IssueId, LibraryId,
    MemberId, ReservationId,
};
pub use self::library::{BorrowingSettings, DurationType, FineSettings, Library, LibraryType};
pub use self::library_service::LibraryService;
pub use self::member::Member;
pub use self::member_service::MemberService;
pub use self::reservation_service::{ReservationService, ReservePolicy};
