//! Handler tests for the catalogue endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use super::*;
use crate::domain::Error;
use crate::domain::ports::{
    MockCatalogueCommand, MockLendingCommand, MockLibraryAdmin, MockMemberCommand,
    MockReservationCommand,
};
use crate::inbound::http::actor::ACTOR_ID_HEADER;

fn state_with(catalogue: MockCatalogueCommand) -> HttpState {
    HttpState {
        lending: Arc::new(MockLendingCommand::new()),
        reservations: Arc::new(MockReservationCommand::new()),
        catalogue: Arc::new(catalogue),
        members: Arc::new(MockMemberCommand::new()),
        admin: Arc::new(MockLibraryAdmin::new()),
    }
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(create_author)
            .service(get_author)
            .service(delete_author)
            .service(create_book)
            .service(get_book)
            .service(delete_book)
            .service(create_book_item)
            .service(get_book_item),
    )
}

fn actor_header() -> (&'static str, String) {
    (ACTOR_ID_HEADER, crate::domain::ActorId::random().to_string())
}

fn author() -> Author {
    Author {
        id: crate::domain::AuthorId::random(),
        library: crate::domain::LibraryId::random(),
        name: "Mary Stewart".to_owned(),
        active: true,
    }
}

#[actix_web::test]
async fn create_author_returns_201_with_the_record() {
    let created = author();
    let expected_name = created.name.clone();
    let mut catalogue = MockCatalogueCommand::new();
    catalogue
        .expect_create_author()
        .returning(move |_| Ok(created.clone()));

    let app = actix_test::init_service(test_app(state_with(catalogue))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/authors")
        .insert_header(actor_header())
        .set_json(json!({"name": "Mary Stewart"}))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("name").and_then(Value::as_str),
        Some(expected_name.as_str())
    );
}

#[actix_web::test]
async fn create_book_passes_optional_fields_through() {
    let mut catalogue = MockCatalogueCommand::new();
    catalogue
        .expect_create_book()
        .withf(|request| request.format.is_none() && request.language.is_none())
        .returning(|request| {
            Ok(Book {
                id: crate::domain::BookId::random(),
                library: crate::domain::LibraryId::random(),
                title: request.title,
                subject: request.subject,
                publisher: request.publisher,
                pages: request.pages,
                format: BookFormat::HardCover,
                language: "en".to_owned(),
                description: request.description,
                author: request.author,
                active: true,
            })
        });

    let app = actix_test::init_service(test_app(state_with(catalogue))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/books")
        .insert_header(actor_header())
        .set_json(json!({
            "title": "The Crystal Cave",
            "subject": "Fiction",
            "publisher": "Hodder",
            "pages": 512,
            "authorId": crate::domain::AuthorId::random(),
        }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("format").and_then(Value::as_str), Some("HardCover"));
    assert_eq!(body.get("language").and_then(Value::as_str), Some("en"));
}

#[actix_web::test]
async fn deleting_a_referenced_author_maps_to_409() {
    let mut catalogue = MockCatalogueCommand::new();
    catalogue
        .expect_delete_author()
        .returning(|_, _| Err(Error::RecordInUse));

    let app = actix_test::init_service(test_app(state_with(catalogue))).await;
    let request = actix_test::TestRequest::delete()
        .uri(&format!(
            "/api/v1/authors/{}",
            crate::domain::AuthorId::random()
        ))
        .insert_header(actor_header())
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("record_in_use")
    );
}

#[actix_web::test]
async fn deleting_a_book_with_copies_maps_to_409() {
    let mut catalogue = MockCatalogueCommand::new();
    catalogue
        .expect_delete_book()
        .returning(|_, _| Err(Error::RecordInUse));

    let app = actix_test::init_service(test_app(state_with(catalogue))).await;
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/books/{}", crate::domain::BookId::random()))
        .insert_header(actor_header())
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("record_in_use")
    );
}

#[actix_web::test]
async fn deleting_an_unreferenced_book_returns_204() {
    let mut catalogue = MockCatalogueCommand::new();
    catalogue.expect_delete_book().returning(|_, _| Ok(()));

    let app = actix_test::init_service(test_app(state_with(catalogue))).await;
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/books/{}", crate::domain::BookId::random()))
        .insert_header(actor_header())
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn unknown_book_maps_to_404() {
    let mut catalogue = MockCatalogueCommand::new();
    catalogue
        .expect_get_book()
        .returning(|_, id| Err(Error::not_found("book", id)));

    let app = actix_test::init_service(test_app(state_with(catalogue))).await;
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/books/{}", crate::domain::BookId::random()))
        .insert_header(actor_header())
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_book_item_returns_the_generated_barcode() {
    let mut catalogue = MockCatalogueCommand::new();
    catalogue.expect_create_book_item().returning(|request| {
        Ok(crate::domain::BookItem {
            id: crate::domain::BookItemId::random(),
            library: crate::domain::LibraryId::random(),
            book: request.book,
            barcode: "BAR-000017".to_owned(),
            status: crate::domain::BookItemStatus::Available,
            borrowed_by: None,
            reserved_by: None,
            revision: 0,
            active: true,
        })
    });

    let app = actix_test::init_service(test_app(state_with(catalogue))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/book-items")
        .insert_header(actor_header())
        .set_json(json!({"bookId": crate::domain::BookId::random()}))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("barcode").and_then(Value::as_str),
        Some("BAR-000017")
    );
    assert_eq!(
        body.get("status").and_then(Value::as_str),
        Some("Available")
    );
}
