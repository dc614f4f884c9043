//! Domain ports for the hexagonal boundary.
//!
//! Driven ports describe how the engines expect to reach the transactional
//! store; driving ports are the operation surface the inbound adapters
//! call. Every trait exposes strongly typed errors so adapters map their
//! failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_command;
mod catalogue_repository;
mod circulation_repository;
mod lending_command;
mod library_admin;
mod library_repository;
mod member_command;
mod member_repository;
mod reservation_command;

#[cfg(test)]
pub use catalogue_command::MockCatalogueCommand;
pub use catalogue_command::{
    CatalogueCommand, CreateAuthorRequest, CreateBookItemRequest, CreateBookRequest,
};
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
#[cfg(test)]
pub use circulation_repository::MockCirculationRepository;
pub use circulation_repository::{
    BorrowCommit, CirculationRepository, CirculationRepositoryError, ReserveCommit, ReturnCommit,
};
#[cfg(test)]
pub use lending_command::MockLendingCommand;
pub use lending_command::{
    BorrowRequest, BorrowResponse, LendingCommand, ReportLostRequest, ReportLostResponse,
    ReturnRequest, ReturnResponse,
};
#[cfg(test)]
pub use library_admin::MockLibraryAdmin;
pub use library_admin::{
    ConfigureBorrowingRequest, ConfigureFinesRequest, LibraryAdmin, RegisterLibraryRequest,
};
#[cfg(test)]
pub use library_repository::MockLibraryRepository;
pub use library_repository::{LibraryRepository, LibraryRepositoryError};
#[cfg(test)]
pub use member_command::MockMemberCommand;
pub use member_command::{MemberCommand, RegisterMemberRequest};
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{MemberRepository, MemberRepositoryError};
#[cfg(test)]
pub use reservation_command::MockReservationCommand;
pub use reservation_command::{
    CancelReservationRequest, CancelReservationResponse, ReservationCommand, ReserveRequest,
    ReserveResponse,
};
