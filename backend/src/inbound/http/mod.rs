//! HTTP inbound adapter exposing the user record endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::{ApiError, ApiResult};
pub use health::HealthState;
pub use state::HttpState;

/// JSON extractor settings shared by every handler.
///
/// The body is decoded as JSON whatever `Content-Type` the client sent, or
/// when it sent none. Bodies that fail to decode are answered with the
/// standard error envelope instead of actix's plain-text rejection.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err, _req| {
            ApiError::invalid_body(format!("invalid request body: {err}")).into()
        })
}

/// Register every route on an actix `ServiceConfig`.
///
/// Callers must provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_records::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::server_status)
        .service(health::ready)
        .service(health::live)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::delete_user);
}
