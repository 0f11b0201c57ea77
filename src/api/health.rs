use crate::database::UserStore;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `healthy` when the user store can be read, `degraded` otherwise.
    pub status: String,
    pub service: String,
    pub version: String,
    /// Number of stored users, absent when the store could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "User store is readable", body = HealthResponse),
        (status = 503, description = "User store is unreadable", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn UserStore>) -> HttpResponse {
    let (mut resp, status, users) = match store.get_all().await {
        Ok(users) => (HttpResponse::Ok(), "healthy", Some(users.len())),
        Err(e) => {
            log::error!("❌ Health check could not read user store: {}", e);
            (HttpResponse::ServiceUnavailable(), "degraded", None)
        }
    };

    resp.json(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
