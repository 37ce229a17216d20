//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer and the
//! schema wrappers that describe domain types without coupling them to
//! utoipa. Swagger UI serves it in debug builds.

use crate::inbound::http::health::StatusResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, NewUserSchema, UserSchema};
use crate::inbound::http::users::{UserDeletedResponse, UserInsertedResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User records API",
        description = "Create, read and delete user records held in MongoDB."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::server_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(
        UserSchema,
        NewUserSchema,
        UserInsertedResponse,
        UserDeletedResponse,
        StatusResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User record operations"),
        (name = "health", description = "Status and health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

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

    #[rstest]
    #[case("/")]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[case("/user")]
    #[case("/user/{id}")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn user_path_supports_get_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/user/{id}").expect("user path");
        assert!(item.get.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    #[case("User", "user_id")]
    #[case("Error", "code")]
    #[case("Error", "traceId")]
    fn schemas_expose_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }
}
