//! Backend entry-point: wires the services, REST endpoints, and OpenAPI docs.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use library_backend::Trace;
use library_backend::config::AppSettings;
#[cfg(debug_assertions)]
use library_backend::doc::ApiDoc;
use library_backend::domain::{
    CatalogueService, CirculationService, LibraryService, MemberService, ReservationService,
};
use library_backend::inbound::http::health::{HealthState, live, ready};
use library_backend::inbound::http::state::HttpState;
use library_backend::inbound::http::{admin, catalogue, circulation, members};
use library_backend::outbound::memory::MemoryStore;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;

    let store = Arc::new(MemoryStore::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = HttpState {
        lending: Arc::new(CirculationService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        )),
        reservations: Arc::new(ReservationService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
            settings.reserve_policy(),
        )),
        catalogue: Arc::new(CatalogueService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        )),
        members: Arc::new(MemberService::new(store.clone(), store.clone(), clock)),
        admin: Arc::new(LibraryService::new(store.clone())),
    };

    // Readiness follows the store so a wedged lock pulls the instance
    // out of rotation.
    let health_state = web::Data::new(HealthState::with_store_check(move || {
        store.is_responsive()
    }));
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server =
        HttpServer::new(move || build_app(server_health_state.clone(), state.clone()))
            .bind((settings.bind_host.clone(), settings.bind_port))?;

    health_state.mark_ready();
    server.run().await
}

fn build_app(
    health_state: web::Data<HealthState>,
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
    let api = web::scope("/api/v1")
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
        .service(members::remove_member)
        .service(ready)
        .service(live);

    let mut app = App::new()
        .app_data(health_state)
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(api);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
