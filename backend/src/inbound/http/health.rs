//! Health endpoints: liveness and readiness probes.
//!
//! Liveness tracks the process itself. Readiness additionally consults
//! the backing store, so a wedged store takes the instance out of
//! rotation without killing it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

type StoreCheck = Arc<dyn Fn() -> bool + Send + Sync>;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    store_check: Option<StoreCheck>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            store_check: None,
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a health state whose readiness also requires `check` to
    /// pass, typically a cheap store probe.
    pub fn with_store_check(check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self {
            store_check: Some(Arc::new(check)),
            ..Self::default()
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail during
    /// shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Readiness: the server is marked up and the store answers.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
            && self.store_check.as_ref().map_or(true, |check| check())
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe: 200 once the server is up and its store answers,
/// 503 otherwise.
#[utoipa::path(
    get,
    path = "/api/v1/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server and store are ready to handle traffic"),
        (status = 503, description = "Server is not ready or the store is unavailable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe: 200 while the process is alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/api/v1/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    //! Probe behaviour coverage.

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};

    use super::*;

    #[actix_web::test]
    async fn liveness_reports_ok_until_marked_unhealthy() {
        let state = web::Data::new(HealthState::new());
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api/v1").service(live)),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/health/live")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        state.mark_unhealthy();
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/health/live")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn readiness_flips_once_marked() {
        let state = web::Data::new(HealthState::new());
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api/v1").service(ready)),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/health/ready")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.mark_ready();
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/health/ready")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn readiness_follows_the_store_check() {
        let store_up = Arc::new(AtomicBool::new(false));
        let probed = store_up.clone();
        let state = web::Data::new(HealthState::with_store_check(move || {
            probed.load(Ordering::Acquire)
        }));
        state.mark_ready();

        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api/v1").service(ready)),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/health/ready")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        store_up.store(true, Ordering::Release);
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/health/ready")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
