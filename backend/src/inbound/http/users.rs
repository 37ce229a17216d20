//! User record handlers.
//!
//! ```text
//! GET    /user/{id}
//! POST   /user {"name":"alice","email":"alice@example.com"}
//! DELETE /user/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{NewUser, Profile, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, NewUserSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /user`.
///
/// Any JSON object is accepted. `name` defaults to an empty string; every
/// other field is kept as an opaque profile value. Identifier fields are
/// dropped because the store assigns them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        NewUser::new(value.name, value.profile)
    }
}

/// A stored user as returned by `GET /user/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let (id, name, profile) = user.into_parts();
        let id = id.to_string();
        Self {
            user_id: id.clone(),
            id,
            name,
            profile,
        }
    }
}

/// Body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserInsertedResponse {
    #[serde(rename = "insertedID")]
    #[schema(example = "65f1c0ffee0000000000beef")]
    pub inserted_id: String,
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserDeletedResponse {
    #[serde(rename = "deletedID")]
    #[schema(example = "65f1c0ffee0000000000beef")]
    pub deleted_id: String,
}

/// Fetch one user by its `user_id`.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "The user's `user_id`")),
    responses(
        (status = 200, description = "User found", body = UserSchema),
        (status = 404, description = "No user with this id", body = ErrorSchema),
        (status = 500, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = path.into_inner();
    let user = state.users.fetch(&user_id).await?;
    debug!(user_id = %user_id, "user fetched");
    Ok(web::Json(UserResponse::from(user)))
}

/// Create a user whose name is not already taken.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_records::inbound::http::users::create_user;
///
/// let app = App::new().service(create_user);
/// ```
#[utoipa::path(
    post,
    path = "/user",
    request_body = NewUserSchema,
    responses(
        (status = 201, description = "User created", body = UserInsertedResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema),
        (status = 500, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let id = state.users.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserInsertedResponse {
        inserted_id: id.to_string(),
    }))
}

/// Delete one user by its `user_id`.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = String, Path, description = "The user's `user_id`")),
    responses(
        (status = 200, description = "User deleted", body = UserDeletedResponse),
        (status = 404, description = "No user with this id", body = ErrorSchema),
        (status = 500, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserDeletedResponse>> {
    let deleted = state.users.delete(&path.into_inner()).await?;
    Ok(web::Json(UserDeletedResponse {
        deleted_id: deleted.to_string(),
    }))
}
