use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::{GeocodeRequest, GeocodeResult, LocationDraft};
use crate::routes::{geocode_failure, not_found, store_failure, validation_failure, AppState};

/// Configure key location and geocoding routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/locations", web::get().to(list_locations))
        .route("/locations", web::post().to(create_location))
        .route("/locations/{id}", web::get().to(get_location))
        .route("/locations/{id}", web::put().to(update_location))
        .route("/locations/{id}", web::delete().to(delete_location))
        .route("/geocode", web::post().to(geocode));
}

/// GET /api/v1/locations
async fn list_locations(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_locations().await {
        Ok(locations) => HttpResponse::Ok().json(locations),
        Err(e) => store_failure("Failed to load key locations", e),
    }
}

/// POST /api/v1/locations
///
/// The address is geocoded before anything is written.
async fn create_location(
    state: web::Data<AppState>,
    req: web::Json<LocationDraft>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    let coordinates = match state.geocoder.resolve_address(&req.address).await {
        Ok(coordinates) => coordinates,
        Err(e) => return geocode_failure(e),
    };

    match state.store.create_location(&req, coordinates).await {
        Ok(location) => {
            tracing::info!("Created key location {} ({})", location.name, location.id);
            HttpResponse::Created().json(location)
        }
        Err(e) => store_failure("Failed to create key location", e),
    }
}

/// GET /api/v1/locations/{id}
async fn get_location(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_location(id).await {
        Ok(Some(location)) => HttpResponse::Ok().json(location),
        Ok(None) => not_found("Location", id),
        Err(e) => store_failure("Failed to load key location", e),
    }
}

/// PUT /api/v1/locations/{id}
async fn update_location(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<LocationDraft>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    let id = path.into_inner();

    match state.store.get_location(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Location", id),
        Err(e) => return store_failure("Failed to load key location", e),
    }

    let coordinates = match state.geocoder.resolve_address(&req.address).await {
        Ok(coordinates) => coordinates,
        Err(e) => return geocode_failure(e),
    };

    match state.store.update_location(id, &req, coordinates).await {
        Ok(Some(location)) => HttpResponse::Ok().json(location),
        Ok(None) => not_found("Location", id),
        Err(e) => store_failure("Failed to update key location", e),
    }
}

/// DELETE /api/v1/locations/{id}
async fn delete_location(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete_location(id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => not_found("Location", id),
        Err(e) => store_failure("Failed to delete key location", e),
    }
}

/// Geocode endpoint
///
/// POST /api/v1/geocode
///
/// Request body:
/// ```json
/// { "address": "1600 Pennsylvania Ave NW, Washington, DC" }
/// ```
///
/// Always answers 200; failures are reported in the body with `success: false`.
async fn geocode(state: web::Data<AppState>, req: web::Json<GeocodeRequest>) -> impl Responder {
    let result = state.geocoder.resolve_address(&req.address).await;

    if let Err(e) = &result {
        tracing::info!("Geocode lookup failed: {}", e);
    }

    HttpResponse::Ok().json(GeocodeResult::from(result))
}
