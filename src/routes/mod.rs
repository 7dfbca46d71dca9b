// Route exports
pub mod criteria;
pub mod locations;
pub mod properties;
pub mod ratings;
pub mod reports;

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::config::MapSettings;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{GeocodeError, Geocoder, PostgresClient, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostgresClient>,
    pub geocoder: Arc<Geocoder>,
    pub map: MapSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(criteria::configure)
            .configure(properties::configure)
            .configure(ratings::configure)
            .configure(reports::configure)
            .configure(locations::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

pub(crate) fn error_response(
    status: StatusCode,
    error: &str,
    message: impl ToString,
) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_failure(errors: ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: {:?}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors)
}

pub(crate) fn not_found(kind: &str, id: Uuid) -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        &format!("{} not found", kind),
        format!("No {} with id {}", kind.to_lowercase(), id),
    )
}

pub(crate) fn store_failure(context: &str, e: StoreError) -> HttpResponse {
    tracing::error!("{}: {}", context, e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, context, e)
}

/// Map a geocoding failure to a status the client can act on
pub(crate) fn geocode_failure(e: GeocodeError) -> HttpResponse {
    let status = match e {
        GeocodeError::EmptyAddress => StatusCode::BAD_REQUEST,
        GeocodeError::NotFound => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
    };
    error_response(status, "Failed to geocode address", e)
}
