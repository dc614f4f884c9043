//! End-to-end lending flows over the HTTP surface backed by the
//! in-memory store.

use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};
use uuid::Uuid;

use library_backend::domain::{
    CatalogueService, CirculationService, LibraryService, MemberService, ReservationService,
    ReservePolicy,
};
use library_backend::inbound::http::actor::ACTOR_ID_HEADER;
use library_backend::inbound::http::state::HttpState;
use library_backend::inbound::http::{admin, catalogue, circulation, members};
use library_backend::outbound::memory::MemoryStore;

/// Wall clock the tests can move forward between requests.
struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("clock lock");
        *now += Duration::days(days);
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

fn start_of_march() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid date")
}

fn wired_state(clock: Arc<SteppingClock>) -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let clock: Arc<dyn Clock> = clock;
    HttpState {
        lending: Arc::new(CirculationService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        )),
        reservations: Arc::new(ReservationService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
            ReservePolicy::RequireNotBorrowed,
        )),
        catalogue: Arc::new(CatalogueService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        )),
        members: Arc::new(MemberService::new(store.clone(), store.clone(), clock)),
        admin: Arc::new(LibraryService::new(store)),
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
            .service(admin::register_library)
            .service(admin::configure_borrowing_settings)
            .service(admin::configure_fine_settings)
            .service(catalogue::create_author)
            .service(catalogue::get_author)
            .service(catalogue::delete_author)
            .service(catalogue::create_book)
            .service(catalogue::get_book)
            .service(catalogue::delete_book)
            .service(catalogue::create_book_item)
            .service(catalogue::get_book_item)
            .service(circulation::borrow_item)
            .service(circulation::return_item)
            .service(circulation::report_lost)
            .service(circulation::reserve_item)
            .service(circulation::cancel_reservation)
            .service(circulation::list_item_fines)
            .service(members::register_member)
            .service(members::get_member)
            .service(members::remove_member),
    )
}

async fn post_json<S>(app: &S, actor: Uuid, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .insert_header((ACTOR_ID_HEADER, actor.to_string()))
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let payload: Value = actix_test::read_body_json(response).await;
    (status, payload)
}

async fn post_empty<S>(app: &S, actor: Uuid, uri: &str) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .insert_header((ACTOR_ID_HEADER, actor.to_string()))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let payload: Value = actix_test::read_body_json(response).await;
    (status, payload)
}

async fn get_json<S>(app: &S, actor: Uuid, uri: &str) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::get()
        .uri(uri)
        .insert_header((ACTOR_ID_HEADER, actor.to_string()))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let payload: Value = actix_test::read_body_json(response).await;
    (status, payload)
}

fn field<'a>(payload: &'a Value, name: &str) -> &'a str {
    payload
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("payload should carry {name}: {payload}"))
}

/// Drive registration through catalogue setup and return the book item id.
async fn seed_catalogue<S>(app: &S, actor: Uuid) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, _) = post_json(
        app,
        actor,
        "/api/v1/libraries",
        json!({
            "name": "Central",
            "address": "1 High Street",
            "libraryType": "Public",
            "phoneNumber": "0123456789",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_json(
        app,
        actor,
        "/api/v1/settings/borrowing",
        json!({"duration": 7, "durationType": "Days"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_json(
        app,
        actor,
        "/api/v1/settings/fines",
        json!({"durationType": "Days", "rate": "2.00"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, author) = post_json(
        app,
        actor,
        "/api/v1/authors",
        json!({"name": "Mary Stewart"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, book) = post_json(
        app,
        actor,
        "/api/v1/books",
        json!({
            "title": "The Crystal Cave",
            "subject": "Fiction",
            "publisher": "Hodder",
            "pages": 512,
            "authorId": field(&author, "id"),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, item) = post_json(
        app,
        actor,
        "/api/v1/book-items",
        json!({"bookId": field(&book, "id")}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(field(&item, "status"), "Available");

    field(&item, "id").to_owned()
}

async fn register_member<S>(app: &S, actor: Uuid, name: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, member) = post_json(
        app,
        actor,
        "/api/v1/members",
        json!({"name": name, "phoneNumber": "0777000000"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    field(&member, "id").to_owned()
}

#[actix_web::test]
async fn late_return_closes_the_issue_and_raises_a_fine() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock.clone()))).await;
    let actor = Uuid::new_v4();

    let item_id = seed_catalogue(&app, actor).await;
    let member_id = register_member(&app, actor, "Ada").await;

    let (status, issue) = post_json(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/borrow"),
        json!({"memberId": member_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let due = field(&issue, "dueDate").to_owned();
    assert!(due.starts_with("2024-03-08"), "loan runs 7 days: {due}");

    // Three days overdue at a rate of 2.00 per day.
    clock.advance_days(10);
    let (status, returned) = post_empty(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/return"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(returned.pointer("/issue/returnedDate").is_some());
    assert_eq!(
        returned.pointer("/fine/amount").and_then(Value::as_str),
        Some("6.00")
    );

    let (status, item) = get_json(&app, actor, &format!("/api/v1/book-items/{item_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&item, "status"), "Available");

    // The fine stays on the item's record.
    let (status, fines) = get_json(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/fines"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fines.as_array().map(Vec::len), Some(1));
    assert_eq!(
        fines.pointer("/0/amount").and_then(Value::as_str),
        Some("6.00")
    );
}

#[actix_web::test]
async fn on_time_return_raises_no_fine() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock.clone()))).await;
    let actor = Uuid::new_v4();

    let item_id = seed_catalogue(&app, actor).await;
    let member_id = register_member(&app, actor, "Ada").await;

    let (status, _) = post_json(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/borrow"),
        json!({"memberId": member_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    clock.advance_days(5);
    let (status, returned) = post_empty(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/return"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned.get("fine"), Some(&Value::Null));
}

#[actix_web::test]
async fn waiting_reservation_completes_when_the_holder_borrows() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock))).await;
    let actor = Uuid::new_v4();

    let item_id = seed_catalogue(&app, actor).await;
    let member_id = register_member(&app, actor, "Ada").await;

    let (status, reservation) = post_json(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/reserve"),
        json!({"memberId": member_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(field(&reservation, "status"), "Waiting");

    let (status, _) = post_json(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/borrow"),
        json!({"memberId": member_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The hold is spent, so cancelling it now reports a conflict.
    let reservation_id = field(&reservation, "id").to_owned();
    let (status, error) = post_empty(
        &app,
        actor,
        &format!("/api/v1/reservations/{reservation_id}/cancel"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(field(&error, "code"), "no_waiting_reservation");
}

#[actix_web::test]
async fn borrowing_twice_reports_a_conflict() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock))).await;
    let actor = Uuid::new_v4();

    let item_id = seed_catalogue(&app, actor).await;
    let member_id = register_member(&app, actor, "Ada").await;
    let rival_id = register_member(&app, actor, "Grace").await;

    let (status, _) = post_json(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/borrow"),
        json!({"memberId": member_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = post_json(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/borrow"),
        json!({"memberId": rival_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(field(&error, "code"), "already_borrowed");
}

#[actix_web::test]
async fn actors_without_a_library_are_rejected() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock))).await;
    let registered = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let item_id = seed_catalogue(&app, registered).await;

    let (status, error) = post_json(
        &app,
        stranger,
        &format!("/api/v1/book-items/{item_id}/borrow"),
        json!({"memberId": Uuid::new_v4()}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field(&error, "code"), "no_library_assigned");
}

#[actix_web::test]
async fn lost_items_leave_circulation_until_reported() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock))).await;
    let actor = Uuid::new_v4();

    let item_id = seed_catalogue(&app, actor).await;
    let member_id = register_member(&app, actor, "Ada").await;

    let (status, item) = post_empty(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/report-lost"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&item, "status"), "Lost");

    let (status, error) = post_json(
        &app,
        actor,
        &format!("/api/v1/book-items/{item_id}/borrow"),
        json!({"memberId": member_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(field(&error, "code"), "item_lost");
}

#[actix_web::test]
async fn created_book_reads_back_field_for_field() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock))).await;
    let actor = Uuid::new_v4();

    let (status, _) = post_json(
        &app,
        actor,
        "/api/v1/libraries",
        json!({
            "name": "Central",
            "address": "1 High Street",
            "libraryType": "Public",
            "phoneNumber": "0123456789",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, author) = post_json(
        &app,
        actor,
        "/api/v1/authors",
        json!({"name": "Mary Stewart"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let submitted = json!({
        "title": "The Hollow Hills",
        "subject": "Fiction",
        "publisher": "Hodder",
        "pages": 544,
        "format": "PaperBack",
        "language": "cy",
        "description": "Second of the Merlin trilogy.",
        "authorId": field(&author, "id"),
    });
    let (status, created) = post_json(&app, actor, "/api/v1/books", submitted.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let book_id = field(&created, "id").to_owned();
    let (status, fetched) = get_json(&app, actor, &format!("/api/v1/books/{book_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, fetched, "create and read payloads agree");

    for (name, value) in submitted.as_object().expect("object body") {
        assert_eq!(
            fetched.get(name),
            Some(value),
            "field {name} survives the round trip"
        );
    }
}

#[actix_web::test]
async fn registered_member_reads_back_field_for_field() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock))).await;
    let actor = Uuid::new_v4();

    let (status, _) = post_json(
        &app,
        actor,
        "/api/v1/libraries",
        json!({
            "name": "Central",
            "address": "1 High Street",
            "libraryType": "Public",
            "phoneNumber": "0123456789",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let submitted = json!({
        "name": "Ada",
        "phoneNumber": "0777000000",
        "email": "ada@example.org",
    });
    let (status, created) = post_json(&app, actor, "/api/v1/members", submitted.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(
        field(&created, "registeredOn").starts_with("2024-03-01"),
        "registration stamped from the wall clock"
    );

    let member_id = field(&created, "id").to_owned();
    let (status, fetched) = get_json(&app, actor, &format!("/api/v1/members/{member_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, fetched, "create and read payloads agree");

    for (name, value) in submitted.as_object().expect("object body") {
        assert_eq!(
            fetched.get(name),
            Some(value),
            "field {name} survives the round trip"
        );
    }
}

#[actix_web::test]
async fn referenced_catalogue_records_resist_deletion() {
    let clock = SteppingClock::starting_at(start_of_march());
    let app = actix_test::init_service(test_app(wired_state(clock))).await;
    let actor = Uuid::new_v4();

    let (status, _) = post_json(
        &app,
        actor,
        "/api/v1/libraries",
        json!({
            "name": "Central",
            "address": "1 High Street",
            "libraryType": "Public",
            "phoneNumber": "0123456789",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, author) = post_json(
        &app,
        actor,
        "/api/v1/authors",
        json!({"name": "Mary Stewart"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, book) = post_json(
        &app,
        actor,
        "/api/v1/books",
        json!({
            "title": "The Crystal Cave",
            "subject": "Fiction",
            "publisher": "Hodder",
            "pages": 512,
            "authorId": field(&author, "id"),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = field(&book, "id").to_owned();

    let (status, _) = post_json(
        &app,
        actor,
        "/api/v1/book-items",
        json!({"bookId": book_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The circulating copy pins the book in place.
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/books/{book_id}"))
        .insert_header((ACTOR_ID_HEADER, actor.to_string()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(field(&error, "code"), "record_in_use");

    // A member with no circulation history can be removed outright.
    let member_id = register_member(&app, actor, "Ada").await;
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/members/{member_id}"))
        .insert_header((ACTOR_ID_HEADER, actor.to_string()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = get_json(&app, actor, &format!("/api/v1/members/{member_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
