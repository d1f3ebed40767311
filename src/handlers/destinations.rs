use crate::{
    error::ApiError,
    models::{DestinationSearchQuery, PathsQuery},
    services::{DestinationService, PathService},
};
use actix_web::{get, web, HttpResponse};
use uuid::Uuid;

pub fn destinations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/destinations")
            .service(search_destinations)
            .service(popular_destinations)
            .service(find_paths)
            .service(get_path),
    );
}

/// Autocomplete over destination names and countries
#[get("/search")]
pub async fn search_destinations(
    params: web::Query<DestinationSearchQuery>,
    destination_service: web::Data<DestinationService>,
) -> Result<HttpResponse, ApiError> {
    let suggestions = destination_service.search(&params.query).await?;
    Ok(HttpResponse::Ok().json(suggestions))
}

#[get("/popular")]
pub async fn popular_destinations(
    destination_service: web::Data<DestinationService>,
) -> Result<HttpResponse, ApiError> {
    let destinations = destination_service.popular().await?;
    Ok(HttpResponse::Ok().json(destinations))
}

/// Stored routes between two places, most popular first
#[get("/paths")]
pub async fn find_paths(
    params: web::Query<PathsQuery>,
    path_service: web::Data<PathService>,
) -> Result<HttpResponse, ApiError> {
    let paths = path_service
        .find(
            params.from.as_deref(),
            params.to.as_deref(),
            params.transport_type,
        )
        .await?;
    Ok(HttpResponse::Ok().json(paths))
}

#[get("/paths/{id}")]
pub async fn get_path(
    id: web::Path<String>,
    path_service: web::Data<PathService>,
) -> Result<HttpResponse, ApiError> {
    match id.parse::<Uuid>() {
        Ok(id) => {
            let path = path_service.get(id).await?;
            Ok(HttpResponse::Ok().json(path))
        }
        Err(_) => Err(ApiError::InvalidInput("Invalid path ID format".to_string())),
    }
}
