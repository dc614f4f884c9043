//! Port for library directory and per-library settings persistence.

use async_trait::async_trait;

use crate::domain::context::{ActorId, LibraryScope};
use crate::domain::library::{BorrowingSettings, FineSettings, Library};

use super::define_port_error;

define_port_error! {
    /// Errors raised by library repository adapters.
    pub enum LibraryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "library repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "library repository query failed: {message}",
        /// A second active settings row would violate the one-active
        /// constraint for the library.
        DuplicateActiveSettings { kind: String } =>
            "an active {kind} settings row already exists for this library",
    }
}

/// Port for reading libraries and their lending parameters.
///
/// `find_active_for_user` deliberately returns every match so the caller
/// can distinguish "no library assigned" from "ambiguously assigned".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Persist a new library.
    async fn create_library(&self, library: &Library) -> Result<(), LibraryRepositoryError>;

    /// All active libraries whose assigned user is the given actor.
    async fn find_active_for_user(
        &self,
        actor: &ActorId,
    ) -> Result<Vec<Library>, LibraryRepositoryError>;

    /// Persist borrowing settings; rejects a second active row per library.
    async fn create_borrowing_settings(
        &self,
        scope: &LibraryScope,
        settings: &BorrowingSettings,
    ) -> Result<(), LibraryRepositoryError>;

    /// Persist fine settings; rejects a second active row per library.
    async fn create_fine_settings(
        &self,
        scope: &LibraryScope,
        settings: &FineSettings,
    ) -> Result<(), LibraryRepositoryError>;

    /// The library's active borrowing settings, if configured.
    async fn active_borrowing_settings(
        &self,
        scope: &LibraryScope,
    ) -> Result<Option<BorrowingSettings>, LibraryRepositoryError>;

    /// The library's active fine settings, if configured.
    async fn active_fine_settings(
        &self,
        scope: &LibraryScope,
    ) -> Result<Option<FineSettings>, LibraryRepositoryError>;
}
