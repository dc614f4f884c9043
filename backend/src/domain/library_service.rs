//! Library administration service.
//!
//! Registers libraries and their per-library lending parameters. Settings
//! rows are stamped with the acting user's resolved library; the store
//! enforces the one-active-row-per-library constraint.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::context::LibraryScope;
use crate::domain::error::Error;
use crate::domain::ids::{BorrowingSettingsId, FineSettingsId, LibraryId};
use crate::domain::library::{BorrowingSettings, FineSettings, Library};
use crate::domain::ports::{
    ConfigureBorrowingRequest, ConfigureFinesRequest, LibraryAdmin, LibraryRepository,
    LibraryRepositoryError, RegisterLibraryRequest,
};

fn map_repository_error(error: LibraryRepositoryError) -> Error {
    match error {
        LibraryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("library repository unavailable: {message}"))
        }
        LibraryRepositoryError::Query { message } => {
            Error::internal(format!("library repository error: {message}"))
        }
        LibraryRepositoryError::DuplicateActiveSettings { kind } => Error::invalid_request(
            format!("an active {kind} settings row already exists for this library"),
        ),
    }
}

/// Service implementing the [`LibraryAdmin`] driving port.
#[derive(Clone)]
pub struct LibraryService<R> {
    library_repo: Arc<R>,
}

impl<R> LibraryService<R> {
    /// Create the service with the library repository.
    pub fn new(library_repo: Arc<R>) -> Self {
        Self { library_repo }
    }
}

#[async_trait]
impl<R> LibraryAdmin for LibraryService<R>
where
    R: LibraryRepository,
{
    async fn register_library(&self, request: RegisterLibraryRequest) -> Result<Library, Error> {
        let library = Library {
            id: LibraryId::random(),
            name: request.name,
            address: request.address,
            library_type: request.library_type,
            phone_number: request.phone_number,
            email: request.email,
            assigned_user: request.actor,
            active: true,
        };
        self.library_repo
            .create_library(&library)
            .await
            .map_err(map_repository_error)?;
        info!(library = %library.id, "library registered");
        Ok(library)
    }

    async fn configure_borrowing_settings(
        &self,
        request: ConfigureBorrowingRequest,
    ) -> Result<BorrowingSettings, Error> {
        let scope = LibraryScope::resolve(self.library_repo.as_ref(), &request.actor).await?;
        let settings = BorrowingSettings {
            id: BorrowingSettingsId::random(),
            library: scope.library(),
            duration: request.duration,
            duration_type: request.duration_type,
            active: true,
        };
        self.library_repo
            .create_borrowing_settings(&scope, &settings)
            .await
            .map_err(map_repository_error)?;
        Ok(settings)
    }

    async fn configure_fine_settings(
        &self,
        request: ConfigureFinesRequest,
    ) -> Result<FineSettings, Error> {
        let scope = LibraryScope::resolve(self.library_repo.as_ref(), &request.actor).await?;
        let settings = FineSettings {
            id: FineSettingsId::random(),
            library: scope.library(),
            duration_type: request.duration_type,
            rate: request.rate,
            active: true,
        };
        self.library_repo
            .create_fine_settings(&scope, &settings)
            .await
            .map_err(map_repository_error)?;
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "library_service_tests.rs"]
mod tests;
