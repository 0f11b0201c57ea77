use actix_web::{web, HttpRequest, HttpResponse};
use crate::{
    database::{self, UserStore},
    models::User,
    utils::error::AppError,
    validation::ValidationErrors,
};

/// Accepts bodies without a JSON content type and answers bad JSON in the
/// same shape as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            log::warn!("⚠️ Rejected request body: {}", err);
            AppError::MalformedBody(err.to_string()).into()
        })
}

/// The ID must be the whole last path segment, digits only.
fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::MalformedUri(raw.to_string()));
    }
    raw.parse::<i64>().map_err(|_| AppError::MalformedUri(raw.to_string()))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, ascending by ID", body = [User]),
        (status = 500, description = "User store unavailable", body = ValidationErrors)
    )
)]
pub async fn get_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users - listing users");

    let users = store.get_all().await.map_err(|e| {
        log::error!("❌ Error listing users: {}", e);
        AppError::from(e)
    })?;

    log::info!("✅ Listed {} users", users.len());
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = User,
    responses(
        (status = 200, description = "User created"),
        (status = 400, description = "Missing or malformed properties", body = ValidationErrors),
        (status = 500, description = "User store unavailable", body = ValidationErrors)
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    body: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users - creating user");

    match store.create(body.into_inner()).await {
        Ok(user) => {
            log::info!("✅ User created with id {}", user.id);
            Ok(HttpResponse::Ok().finish())
        }
        Err(e) => {
            log::warn!("⚠️ Failed to create user: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID of the user to edit")),
    request_body = User,
    responses(
        (status = 200, description = "User edited"),
        (
            status = 400,
            description = "Empty edit, malformed email or malformed ID",
            body = ValidationErrors
        ),
        (status = 404, description = "No user with this ID", body = ValidationErrors),
        (status = 500, description = "User store unavailable", body = ValidationErrors)
    )
)]
pub async fn edit_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
    body: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    // body problems are reported ahead of a bad ID
    let changes = body.into_inner();
    database::ensure_partial(&changes)?;
    let id = parse_user_id(&path)?;

    log::info!("🔧 PUT /users/{} - editing user", id);

    match store.edit(changes, id).await {
        Ok(()) => {
            log::info!("✅ User {} edited", id);
            Ok(HttpResponse::Ok().finish())
        }
        Err(e) => {
            log::warn!("⚠️ Failed to edit user {}: {}", id, e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID of the user to delete")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed ID", body = ValidationErrors),
        (status = 404, description = "No user with this ID", body = ValidationErrors),
        (status = 500, description = "User store unavailable", body = ValidationErrors)
    )
)]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_user_id(&path)?;

    log::info!("🗑️  DELETE /users/{} - removing user", id);

    match store.delete(id).await {
        Ok(()) => {
            log::info!("✅ User {} deleted", id);
            Ok(HttpResponse::Ok().finish())
        }
        Err(e) => {
            log::warn!("⚠️ Failed to delete user {}: {}", id, e);
            Err(e.into())
        }
    }
}

/// PUT or DELETE without an ID in the path.
pub async fn missing_user_id(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::MalformedUri(req.path().to_string()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/users")
            .route("", web::get().to(get_users))
            .route("/", web::get().to(get_users))
            .route("", web::post().to(create_user))
            .route("/", web::post().to(create_user))
            .route("/", web::put().to(missing_user_id))
            .route("/", web::delete().to(missing_user_id))
            .route("/{id}", web::put().to(edit_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
