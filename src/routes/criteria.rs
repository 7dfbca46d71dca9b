use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::CriterionDraft;
use crate::routes::{not_found, store_failure, validation_failure, AppState};

/// Configure criterion routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/criteria", web::get().to(list_criteria))
        .route("/criteria", web::post().to(create_criterion))
        .route("/criteria/{id}", web::get().to(get_criterion))
        .route("/criteria/{id}", web::put().to(update_criterion))
        .route("/criteria/{id}", web::delete().to(delete_criterion));
}

/// GET /api/v1/criteria
async fn list_criteria(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_criteria().await {
        Ok(criteria) => HttpResponse::Ok().json(criteria),
        Err(e) => store_failure("Failed to load criteria", e),
    }
}

/// POST /api/v1/criteria
///
/// Request body:
/// ```json
/// { "name": "In-unit laundry", "type": "must-have", "definition": "Washer and dryer" }
/// ```
async fn create_criterion(
    state: web::Data<AppState>,
    req: web::Json<CriterionDraft>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    match state.store.create_criterion(&req).await {
        Ok(criterion) => {
            tracing::info!("Created criterion {} ({})", criterion.name, criterion.criterion_type);
            HttpResponse::Created().json(criterion)
        }
        Err(e) => store_failure("Failed to create criterion", e),
    }
}

/// GET /api/v1/criteria/{id}
async fn get_criterion(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_criterion(id).await {
        Ok(Some(criterion)) => HttpResponse::Ok().json(criterion),
        Ok(None) => not_found("Criterion", id),
        Err(e) => store_failure("Failed to load criterion", e),
    }
}

/// PUT /api/v1/criteria/{id}
async fn update_criterion(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<CriterionDraft>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    let id = path.into_inner();

    match state.store.update_criterion(id, &req).await {
        Ok(Some(criterion)) => HttpResponse::Ok().json(criterion),
        Ok(None) => not_found("Criterion", id),
        Err(e) => store_failure("Failed to update criterion", e),
    }
}

/// DELETE /api/v1/criteria/{id}
///
/// Ratings for the criterion are removed with it.
async fn delete_criterion(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete_criterion(id).await {
        Ok(true) => {
            tracing::info!("Deleted criterion {}", id);
            HttpResponse::NoContent().finish()
        }
        Ok(false) => not_found("Criterion", id),
        Err(e) => store_failure("Failed to delete criterion", e),
    }
}
