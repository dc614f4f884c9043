//! Library administration HTTP handlers.
//!
//! ```text
//! POST /api/v1/libraries           Register a library
//! POST /api/v1/settings/borrowing  Configure the loan period
//! POST /api/v1/settings/fines      Configure the fine rate
//! ```

use actix_web::{HttpRequest, HttpResponse, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ConfigureBorrowingRequest, ConfigureFinesRequest, RegisterLibraryRequest,
};
use crate::domain::{BorrowingSettings, DurationType, FineSettings, Library, LibraryType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::actor_id;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for registering a library.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterLibraryBody {
    pub name: String,
    pub address: String,
    #[schema(value_type = String, example = "Public")]
    pub library_type: LibraryType,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Library payload returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::LibraryId,
    pub name: String,
    pub address: String,
    #[schema(value_type = String, example = "Public")]
    pub library_type: LibraryType,
    pub phone_number: String,
    pub email: Option<String>,
}

impl From<Library> for LibraryBody {
    fn from(library: Library) -> Self {
        Self {
            id: library.id,
            name: library.name,
            address: library.address,
            library_type: library.library_type,
            phone_number: library.phone_number,
            email: library.email,
        }
    }
}

/// Request body for configuring the loan period.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingSettingsBody {
    pub duration: u32,
    #[schema(value_type = String, example = "Days")]
    pub duration_type: DurationType,
}

/// Borrowing settings payload returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingSettingsResponseBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::BorrowingSettingsId,
    pub duration: u32,
    #[schema(value_type = String, example = "Days")]
    pub duration_type: DurationType,
}

impl From<BorrowingSettings> for BorrowingSettingsResponseBody {
    fn from(settings: BorrowingSettings) -> Self {
        Self {
            id: settings.id,
            duration: settings.duration,
            duration_type: settings.duration_type,
        }
    }
}

/// Request body for configuring the fine rate.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FineSettingsBody {
    #[schema(value_type = String, example = "Days")]
    pub duration_type: DurationType,
    /// Rate charged per overdue unit, as a decimal string.
    #[schema(value_type = String, example = "2.00")]
    pub rate: Decimal,
}

/// Fine settings payload returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FineSettingsResponseBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::FineSettingsId,
    #[schema(value_type = String, example = "Days")]
    pub duration_type: DurationType,
    #[schema(value_type = String, example = "2.00")]
    pub rate: Decimal,
}

impl From<FineSettings> for FineSettingsResponseBody {
    fn from(settings: FineSettings) -> Self {
        Self {
            id: settings.id,
            duration_type: settings.duration_type,
            rate: settings.rate,
        }
    }
}

/// Register a library managed by the acting user.
#[utoipa::path(
    post,
    path = "/api/v1/libraries",
    request_body = RegisterLibraryBody,
    responses(
        (status = 201, description = "Library registered", body = LibraryBody),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "registerLibrary"
)]
#[post("/libraries")]
pub async fn register_library(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<RegisterLibraryBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let body = payload.into_inner();
    let library = state
        .admin
        .register_library(RegisterLibraryRequest {
            actor,
            name: body.name,
            address: body.address,
            library_type: body.library_type,
            phone_number: body.phone_number,
            email: body.email,
        })
        .await?;
    Ok(HttpResponse::Created().json(LibraryBody::from(library)))
}

/// Configure the acting library's loan period.
#[utoipa::path(
    post,
    path = "/api/v1/settings/borrowing",
    request_body = BorrowingSettingsBody,
    responses(
        (status = 201, description = "Settings stored", body = BorrowingSettingsResponseBody),
        (status = 400, description = "An active row already exists", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "configureBorrowingSettings"
)]
#[post("/settings/borrowing")]
pub async fn configure_borrowing_settings(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<BorrowingSettingsBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let body = payload.into_inner();
    let settings = state
        .admin
        .configure_borrowing_settings(ConfigureBorrowingRequest {
            actor,
            duration: body.duration,
            duration_type: body.duration_type,
        })
        .await?;
    Ok(HttpResponse::Created().json(BorrowingSettingsResponseBody::from(settings)))
}

/// Configure the acting library's fine rate.
#[utoipa::path(
    post,
    path = "/api/v1/settings/fines",
    request_body = FineSettingsBody,
    responses(
        (status = 201, description = "Settings stored", body = FineSettingsResponseBody),
        (status = 400, description = "An active row already exists", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "configureFineSettings"
)]
#[post("/settings/fines")]
pub async fn configure_fine_settings(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<FineSettingsBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let body = payload.into_inner();
    let settings = state
        .admin
        .configure_fine_settings(ConfigureFinesRequest {
            actor,
            duration_type: body.duration_type,
            rate: body.rate,
        })
        .await?;
    Ok(HttpResponse::Created().json(FineSettingsResponseBody::from(settings)))
}
