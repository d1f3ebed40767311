use crate::{
    error::ApiError,
    handlers::auth::UserId,
    models::{HistoryQuery, PreferencesUpdateRequest, RecordSearchRequest},
    services::{PreferencesService, SearchHistoryService},
};
use actix_web::{delete, get, patch, post, web, HttpResponse};
use uuid::Uuid;

pub fn users_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(get_search_history)
            .service(add_search_history)
            .service(clear_search_history)
            .service(delete_search_entry)
            .service(get_statistics)
            .service(get_preferences)
            .service(update_preferences),
    );
}

/// Paged history, newest first
#[get("/search-history")]
pub async fn get_search_history(
    user: UserId,
    params: web::Query<HistoryQuery>,
    search_history_service: web::Data<SearchHistoryService>,
) -> Result<HttpResponse, ApiError> {
    let page = search_history_service
        .list(user.0, params.page, params.limit)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "searchHistory": page.entries,
        "pagination": {
            "page": params.page,
            "limit": params.limit,
            "total": page.total
        }
    })))
}

#[post("/search-history")]
pub async fn add_search_history(
    user: UserId,
    request: web::Json<RecordSearchRequest>,
    search_history_service: web::Data<SearchHistoryService>,
) -> Result<HttpResponse, ApiError> {
    search_history_service
        .record(user.0, &request.from, &request.to)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Search added to history"
    })))
}

#[delete("/search-history")]
pub async fn clear_search_history(
    user: UserId,
    search_history_service: web::Data<SearchHistoryService>,
) -> Result<HttpResponse, ApiError> {
    search_history_service.clear(user.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Search history cleared successfully"
    })))
}

/// Removing an entry that is already gone is a silent success
#[delete("/search-history/{search_id}")]
pub async fn delete_search_entry(
    user: UserId,
    search_id: web::Path<String>,
    search_history_service: web::Data<SearchHistoryService>,
) -> Result<HttpResponse, ApiError> {
    match search_id.parse::<Uuid>() {
        Ok(entry_id) => {
            search_history_service.delete(user.0, entry_id).await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "Search removed from history"
            })))
        }
        Err(_) => Err(ApiError::InvalidInput(
            "Invalid search ID format".to_string(),
        )),
    }
}

#[get("/statistics")]
pub async fn get_statistics(
    user: UserId,
    search_history_service: web::Data<SearchHistoryService>,
) -> Result<HttpResponse, ApiError> {
    let statistics = search_history_service.statistics(user.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "statistics": statistics
    })))
}

#[get("/preferences")]
pub async fn get_preferences(
    user: UserId,
    preferences_service: web::Data<PreferencesService>,
) -> Result<HttpResponse, ApiError> {
    let preferences = preferences_service.get(user.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "preferences": preferences
    })))
}

#[patch("/preferences")]
pub async fn update_preferences(
    user: UserId,
    request: web::Json<PreferencesUpdateRequest>,
    preferences_service: web::Data<PreferencesService>,
) -> Result<HttpResponse, ApiError> {
    let preferences = preferences_service
        .update(user.0, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Preferences updated successfully",
        "preferences": preferences
    })))
}
