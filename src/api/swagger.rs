use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Form Service API",
        version = "1.0.0",
        description = "CRUD over user records kept in a JSON file.\n\n**Validation:** creating a user requires first name, last name, email and organization. An edit needs at least one of them. A supplied email must be well formed."
    ),
    paths(
        // Users
        crate::api::users::get_users,
        crate::api::users::create_user,
        crate::api::users::edit_user,
        crate::api::users::delete_user,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::User,
            crate::validation::FieldError,
            crate::validation::ValidationErrors,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Users", description = "Create, list, edit and delete users."),
        (name = "Health", description = "Health check and request counters."),
    )
)]
pub struct ApiDoc;
