use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::SaveRatingsRequest;
use crate::routes::{not_found, store_failure, validation_failure, AppState};

/// Configure rating routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/properties/{id}/ratings", web::get().to(list_ratings))
        .route("/properties/{id}/ratings", web::put().to(save_ratings));
}

/// GET /api/v1/properties/{id}/ratings
async fn list_ratings(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_property(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Property", id),
        Err(e) => return store_failure("Failed to load property", e),
    }

    match state.store.list_ratings_for_property(id).await {
        Ok(ratings) => HttpResponse::Ok().json(ratings),
        Err(e) => store_failure("Failed to load ratings", e),
    }
}

/// PUT /api/v1/properties/{id}/ratings
///
/// Request body:
/// ```json
/// {
///   "ratings": [
///     { "criterion_id": "uuid", "score": 3, "notes": "Washer in closet" }
///   ]
/// }
/// ```
///
/// Each rating is upserted on its own. The response lists what was saved and
/// what failed; a partial failure still returns 200.
async fn save_ratings(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SaveRatingsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    let id = path.into_inner();

    match state.store.get_property(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Property", id),
        Err(e) => return store_failure("Failed to load property", e),
    }

    let outcome = state.store.save_ratings(id, &req.ratings).await;

    if !outcome.failed.is_empty() {
        tracing::warn!(
            "Saved {} of {} ratings for property {}",
            outcome.saved.len(),
            req.ratings.len(),
            id
        );
    }

    HttpResponse::Ok().json(outcome)
}
