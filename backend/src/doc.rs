//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (admin, catalogue,
//!   circulation, members, health)
//! - **Schemas**: Request and response bodies plus the error payload wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that document domain types
//!   without coupling them to the utoipa framework
//! - **Security**: The `X-Actor-Id` header identifying the acting user
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::admin::{
    BorrowingSettingsBody, BorrowingSettingsResponseBody, FineSettingsBody,
    FineSettingsResponseBody, LibraryBody, RegisterLibraryBody,
};
use crate::inbound::http::catalogue::{
    AuthorBody, BookBody, CreateAuthorBody, CreateBookBody, CreateBookItemBody,
};
use crate::inbound::http::circulation::{
    BookItemBody, FineBody, IssueBody, MemberRefBody, ReservationBody, ReturnBody,
};
use crate::inbound::http::members::{MemberBody, RegisterMemberBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the actor header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ActorId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Actor-Id",
                "Guid of the acting user; every library-scoped request requires it.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Library lending backend API",
        description = "HTTP interface for catalogue management, circulation, \
                       reservations, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ActorId" = [])),
    paths(
        crate::inbound::http::admin::register_library,
        crate::inbound::http::admin::configure_borrowing_settings,
        crate::inbound::http::admin::configure_fine_settings,
        crate::inbound::http::catalogue::create_author,
        crate::inbound::http::catalogue::get_author,
        crate::inbound::http::catalogue::delete_author,
        crate::inbound::http::catalogue::create_book,
        crate::inbound::http::catalogue::get_book,
        crate::inbound::http::catalogue::delete_book,
        crate::inbound::http::catalogue::create_book_item,
        crate::inbound::http::catalogue::get_book_item,
        crate::inbound::http::circulation::borrow_item,
        crate::inbound::http::circulation::return_item,
        crate::inbound::http::circulation::report_lost,
        crate::inbound::http::circulation::reserve_item,
        crate::inbound::http::circulation::cancel_reservation,
        crate::inbound::http::circulation::list_item_fines,
        crate::inbound::http::members::register_member,
        crate::inbound::http::members::get_member,
        crate::inbound::http::members::remove_member,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterLibraryBody,
        LibraryBody,
        BorrowingSettingsBody,
        BorrowingSettingsResponseBody,
        FineSettingsBody,
        FineSettingsResponseBody,
        CreateAuthorBody,
        AuthorBody,
        CreateBookBody,
        BookBody,
        CreateBookItemBody,
        BookItemBody,
        MemberRefBody,
        IssueBody,
        FineBody,
        ReturnBody,
        ReservationBody,
        RegisterMemberBody,
        MemberBody,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "admin", description = "Library registration and settings"),
        (name = "catalogue", description = "Authors, books, and physical copies"),
        (name = "circulation", description = "Borrow, return, lost, and hold actions"),
        (name = "members", description = "Member registration and lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.inbound.http.error.ErrorBody";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_registers_every_circulation_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/book-items/{id}/borrow",
            "/api/v1/book-items/{id}/return",
            "/api/v1/book-items/{id}/report-lost",
            "/api/v1/book-items/{id}/reserve",
            "/api/v1/reservations/{id}/cancel",
            "/api/v1/book-items/{id}/fines",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should register {path}"
            );
        }
    }
}
