use actix_web::{web, HttpResponse, Scope};

use crate::handlers::{destinations_config, health_check, users_config};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .service(health_check)
        .configure(destinations_config)
        .configure(users_config)
}

/// Catch-all for unmatched paths
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "message": "page not found"
    }))
}
