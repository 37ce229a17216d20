//! End-to-end scenarios for the user record endpoints.
//!
//! The app is assembled the same way the server does it (`Trace` plus
//! `configure`) over the in-memory repository, so these tests exercise
//! routing, extraction, the service, and the error envelope together.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use user_records::Trace;
use user_records::domain::ports::InMemoryUserRepository;
use user_records::inbound::http::{HealthState, HttpState, configure};
use user_records::middleware::TRACE_ID_HEADER;

#[fixture]
fn http_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repository(
        Arc::new(InMemoryUserRepository::new()),
        Duration::from_secs(5),
    ))
}

async fn init_app(
    http_state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    test::init_service(
        App::new()
            .app_data(health)
            .app_data(http_state)
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

fn is_object_id_hex(id: &str) -> bool {
    id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())
}

#[rstest]
#[actix_web::test]
async fn status_endpoint_reports_running(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "status": "Server is up and running..." }));
}

#[rstest]
#[actix_web::test]
async fn alice_lifecycle(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({ "name": "alice" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    let id = created["insertedID"]
        .as_str()
        .expect("insertedID is a string")
        .to_owned();
    assert!(is_object_id_hex(&id), "unexpected id shape: {id}");

    let uri = format!("/user/{id}");
    let req = test::TestRequest::get().uri(&uri).to_request();
    let user: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(user["name"], "alice");
    assert_eq!(user["id"], id.as_str());
    assert_eq!(user["user_id"], id.as_str());

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let deleted: Value = test::read_body_json(res).await;
    assert_eq!(deleted, json!({ "deletedID": id }));

    let req = test::TestRequest::get().uri(&uri).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn bob_twice_conflicts(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;
    let bob = json!({ "name": "bob", "team": "platform" });

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(&bob)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(&bob)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let trace_header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "User with the name 'bob' already exists");
    assert_eq!(body["traceId"].as_str(), trace_header.as_deref());
}

#[rstest]
#[actix_web::test]
async fn deleting_unknown_user_is_not_found(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;

    let req = test::TestRequest::delete()
        .uri("/user/000000000000000000000000")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn profile_fields_survive_round_trip(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "name": "dana",
            "_id": "client-chosen",
            "address": { "city": "York", "postcode": "YO1" },
            "tags": ["admin", "ops"],
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["insertedID"].as_str().expect("insertedID");

    let req = test::TestRequest::get()
        .uri(&format!("/user/{id}"))
        .to_request();
    let user: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        user,
        json!({
            "id": id,
            "user_id": id,
            "name": "dana",
            "address": { "city": "York", "postcode": "YO1" },
            "tags": ["admin", "ops"],
        })
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_json_gets_error_envelope(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;

    let req = test::TestRequest::post()
        .uri("/user")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert!(body["traceId"].is_string());
}

#[rstest]
#[case::no_content_type(None)]
#[case::form_content_type(Some("application/x-www-form-urlencoded"))]
#[case::plain_text(Some("text/plain"))]
#[actix_web::test]
async fn create_accepts_json_body_whatever_the_content_type(
    http_state: web::Data<HttpState>,
    #[case] content_type: Option<&'static str>,
) {
    let app = init_app(http_state).await;

    let mut req = test::TestRequest::post()
        .uri("/user")
        .set_payload(r#"{"name":"alice"}"#);
    if let Some(content_type) = content_type {
        req = req.insert_header(("content-type", content_type));
    }
    let res = test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    let id = created["insertedID"].as_str().expect("insertedID is a string");
    assert!(is_object_id_hex(id), "unexpected id shape: {id}");
}

#[rstest]
#[actix_web::test]
async fn non_json_body_without_content_type_is_rejected(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_payload("name=alice")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn readiness_check_is_served(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
