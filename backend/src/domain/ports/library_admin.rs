//! Driving port for library registration and settings administration.

use async_trait::async_trait;

use crate::domain::context::ActorId;
use crate::domain::error::Error;
use crate::domain::library::{BorrowingSettings, DurationType, FineSettings, Library, LibraryType};
use rust_decimal::Decimal;

/// Request to register a library managed by the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterLibraryRequest {
    pub actor: ActorId,
    pub name: String,
    pub address: String,
    pub library_type: LibraryType,
    pub phone_number: String,
    pub email: Option<String>,
}

/// Request to configure the acting library's loan period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureBorrowingRequest {
    pub actor: ActorId,
    pub duration: u32,
    pub duration_type: DurationType,
}

/// Request to configure the acting library's fine rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureFinesRequest {
    pub actor: ActorId,
    pub duration_type: DurationType,
    pub rate: Decimal,
}

/// Driving port covering library and settings administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryAdmin: Send + Sync {
    /// Register a library with the actor as its managing user.
    async fn register_library(&self, request: RegisterLibraryRequest) -> Result<Library, Error>;

    /// Configure borrowing settings; at most one active row per library.
    async fn configure_borrowing_settings(
        &self,
        request: ConfigureBorrowingRequest,
    ) -> Result<BorrowingSettings, Error>;

    /// Configure fine settings; at most one active row per library.
    async fn configure_fine_settings(
        &self,
        request: ConfigureFinesRequest,
    ) -> Result<FineSettings, Error>;
}
