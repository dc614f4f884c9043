//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogueCommand, LendingCommand, LibraryAdmin, MemberCommand, ReservationCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub lending: Arc<dyn LendingCommand>,
    pub reservations: Arc<dyn ReservationCommand>,
    pub catalogue: Arc<dyn CatalogueCommand>,
    pub members: Arc<dyn MemberCommand>,
    pub admin: Arc<dyn LibraryAdmin>,
}
