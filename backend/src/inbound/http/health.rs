//! Status and health endpoints.
//!
//! `GET /` answers as soon as the listener accepts traffic. The liveness and
//! readiness checks are for orchestrators and load balancers.

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Message reported by the status endpoint.
pub const STATUS_MESSAGE: &str = "Server is up and running...";

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusResponse {
    #[schema(example = "Server is up and running...")]
    pub status: String,
}

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn check_response(healthy: bool) -> HttpResponse {
        let mut response = if healthy {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Report that the server is accepting requests.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is up", body = StatusResponse)
    )
)]
#[get("/")]
pub async fn server_status() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        status: STATUS_MESSAGE.to_owned(),
    })
}

/// Fail liveness checks once `shutdown` resolves.
///
/// The server spawns this with its signal listener so orchestrators stop
/// routing to the process while actix drains in-flight requests.
pub async fn fail_liveness_on<F>(state: web::Data<HealthState>, shutdown: F)
where
    F: Future<Output = ()>,
{
    shutdown.await;
    state.mark_unhealthy();
    info!("shutdown requested; liveness checks now fail");
}

/// Readiness check. 200 once the store is connected and the listener bound;
/// 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::check_response(state.is_ready())
}

/// Liveness check. 200 while the process is marked alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::check_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    #[actix_web::test]
    async fn status_reports_running() {
        let app = test::init_service(App::new().service(server_status)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body: StatusResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, STATUS_MESSAGE);
    }

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_state(#[case] mark: bool, #[case] expected: StatusCode) {
        let state = web::Data::new(HealthState::new());
        if mark {
            state.mark_ready();
        }
        let app = test::init_service(App::new().app_data(state).service(ready)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }

    #[actix_web::test]
    async fn liveness_fails_after_shutdown_signal() {
        let state = web::Data::new(HealthState::new());
        let app = test::init_service(App::new().app_data(state.clone()).service(live)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        fail_liveness_on(state.clone(), std::future::ready(())).await;
        assert!(!state.is_alive());
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
