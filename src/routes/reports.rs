use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::core::{build_report, map_center, marker_bounds, ReportSort, ReportView};
use crate::models::{
    Coordinates, MapMarker, MapResponse, ReportQuery, ReportResponse, ReportRow,
};
use crate::routes::{error_response, store_failure, AppState};

/// Configure report and map routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/reports", web::get().to(get_report))
        .route("/map", web::get().to(get_map));
}

/// Comparison report endpoint
///
/// GET /api/v1/reports?view=all&sort=total
///
/// `view` is `tier1` (default) or `all`. `sort` is `total` (default) or a
/// criterion id and only applies to the `all` view.
async fn get_report(
    state: web::Data<AppState>,
    query: web::Query<ReportQuery>,
) -> impl Responder {
    let view = match query.view.as_deref().map(str::parse::<ReportView>).transpose() {
        Ok(view) => view.unwrap_or_default(),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Invalid report view", e),
    };

    let sort = match query.sort.as_deref().map(str::parse::<ReportSort>).transpose() {
        Ok(sort) => sort.unwrap_or_default(),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Invalid sort key", e),
    };

    let loaded = tokio::try_join!(
        state.store.list_properties(Some(false)),
        state.store.list_criteria(),
        state.store.list_ratings(),
    );

    let (properties, criteria, ratings) = match loaded {
        Ok(data) => data,
        Err(e) => return store_failure("Failed to load report data", e),
    };

    if let ReportSort::Criterion(id) = sort {
        if !criteria.iter().any(|c| c.id == id) {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid sort key",
                format!("No criterion with id {}", id),
            );
        }
    }

    let report = build_report(properties, &criteria, ratings, view, sort);

    let rows = report
        .scores
        .into_iter()
        .enumerate()
        .map(|(i, score)| ReportRow {
            rank: i + 1,
            tier: score.tier(),
            score,
        })
        .collect();

    HttpResponse::Ok().json(ReportResponse {
        view: view.to_string(),
        sort: sort.to_string(),
        rows,
        criteria,
        property_count: report.property_count,
        tier1_count: report.tier1_count,
        has_ratings: report.has_ratings,
    })
}

/// Map data endpoint
///
/// GET /api/v1/map
async fn get_map(state: web::Data<AppState>) -> impl Responder {
    let properties = match state.store.list_properties(Some(false)).await {
        Ok(properties) => properties,
        Err(e) => return store_failure("Failed to load properties", e),
    };

    let markers: Vec<MapMarker> = properties
        .into_iter()
        .filter_map(|p| {
            let coordinates = p.coordinates()?;
            Some(MapMarker {
                property_id: p.id,
                name: p.name,
                address: p.address,
                neighborhood: p.neighborhood,
                price: p.price,
                coordinates,
            })
        })
        .collect();

    let points: Vec<Coordinates> = markers.iter().map(|m| m.coordinates).collect();

    HttpResponse::Ok().json(MapResponse {
        center: map_center(&points).unwrap_or_else(|| state.map.default_center()),
        bounds: marker_bounds(&points),
        markers,
    })
}
