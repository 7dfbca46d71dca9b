use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::core::distances_from;
use crate::models::{ArchiveRequest, DistancesResponse, PropertyDraft, PropertyListQuery};
use crate::routes::{
    error_response, geocode_failure, not_found, store_failure, validation_failure, AppState,
};

/// Configure property routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/properties", web::get().to(list_properties))
        .route("/properties", web::post().to(create_property))
        .route("/properties/{id}", web::get().to(get_property))
        .route("/properties/{id}", web::put().to(update_property))
        .route("/properties/{id}", web::delete().to(delete_property))
        .route("/properties/{id}/archived", web::put().to(set_archived))
        .route("/properties/{id}/geocode", web::post().to(geocode_property))
        .route("/properties/{id}/distances", web::get().to(get_distances));
}

/// GET /api/v1/properties?archived=false
async fn list_properties(
    state: web::Data<AppState>,
    query: web::Query<PropertyListQuery>,
) -> impl Responder {
    match state.store.list_properties(query.archived).await {
        Ok(properties) => HttpResponse::Ok().json(properties),
        Err(e) => store_failure("Failed to load properties", e),
    }
}

/// POST /api/v1/properties
async fn create_property(
    state: web::Data<AppState>,
    req: web::Json<PropertyDraft>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    match state.store.create_property(&req).await {
        Ok(property) => {
            tracing::info!("Created property {} at {}", property.id, property.address);
            HttpResponse::Created().json(property)
        }
        Err(e) => store_failure("Failed to create property", e),
    }
}

/// GET /api/v1/properties/{id}
async fn get_property(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_property(id).await {
        Ok(Some(property)) => HttpResponse::Ok().json(property),
        Ok(None) => not_found("Property", id),
        Err(e) => store_failure("Failed to load property", e),
    }
}

/// PUT /api/v1/properties/{id}
async fn update_property(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<PropertyDraft>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    let id = path.into_inner();

    match state.store.update_property(id, &req).await {
        Ok(Some(property)) => HttpResponse::Ok().json(property),
        Ok(None) => not_found("Property", id),
        Err(e) => store_failure("Failed to update property", e),
    }
}

/// DELETE /api/v1/properties/{id}
async fn delete_property(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete_property(id).await {
        Ok(true) => {
            tracing::info!("Deleted property {}", id);
            HttpResponse::NoContent().finish()
        }
        Ok(false) => not_found("Property", id),
        Err(e) => store_failure("Failed to delete property", e),
    }
}

/// PUT /api/v1/properties/{id}/archived
///
/// Request body:
/// ```json
/// { "archived": true }
/// ```
async fn set_archived(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<ArchiveRequest>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.set_property_archived(id, req.archived).await {
        Ok(Some(property)) => HttpResponse::Ok().json(property),
        Ok(None) => not_found("Property", id),
        Err(e) => store_failure("Failed to update archived flag", e),
    }
}

/// POST /api/v1/properties/{id}/geocode
///
/// Resolves the stored address and saves the coordinates on the property.
async fn geocode_property(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    let property = match state.store.get_property(id).await {
        Ok(Some(property)) => property,
        Ok(None) => return not_found("Property", id),
        Err(e) => return store_failure("Failed to load property", e),
    };

    let coordinates = match state.geocoder.resolve_address(&property.address).await {
        Ok(coordinates) => coordinates,
        Err(e) => {
            tracing::warn!("Could not geocode property {}: {}", id, e);
            return geocode_failure(e);
        }
    };

    match state.store.set_property_coordinates(id, coordinates).await {
        Ok(Some(property)) => HttpResponse::Ok().json(property),
        Ok(None) => not_found("Property", id),
        Err(e) => store_failure("Failed to save coordinates", e),
    }
}

/// GET /api/v1/properties/{id}/distances
async fn get_distances(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    let property = match state.store.get_property(id).await {
        Ok(Some(property)) => property,
        Ok(None) => return not_found("Property", id),
        Err(e) => return store_failure("Failed to load property", e),
    };

    let Some(origin) = property.coordinates() else {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Property has no coordinates",
            "Geocode the property address before requesting distances",
        );
    };

    match state.store.list_locations().await {
        Ok(locations) => HttpResponse::Ok().json(DistancesResponse {
            property_id: id,
            distances: distances_from(origin, &locations),
        }),
        Err(e) => store_failure("Failed to load key locations", e),
    }
}
