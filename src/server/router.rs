//! Route table for the food API

use super::handlers::{
    AppState, create_food, delete_food, get_food, list_by_restaurant_id, list_by_restaurant_name,
    list_foods, search_by_title, update_food,
};
use crate::core::error::RequestError;
use axum::{
    Json, Router,
    extract::Request,
    http::{HeaderMap, header::ACCEPT},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

/// Name reported by the health endpoints
pub const SERVICE_NAME: &str = "food-service";

/// Build the food routes
///
/// - GET    /food                            - List all foods
/// - POST   /food                            - Create a food
/// - GET    /food/{id}                       - Get a food by id
/// - PUT    /food/{id}                       - Update title, image and description
/// - DELETE /food/{id}                       - Delete a food
/// - GET    /food/title/{title}              - Case-insensitive title search
/// - GET    /food/restaurant/{id}            - Foods of a restaurant by id
/// - GET    /food/restaurant/name/{name}     - Foods of a restaurant by name
///
/// Every matched route requires the client to accept JSON.
pub fn build_food_routes(state: AppState) -> Router {
    Router::new()
        .route("/food", get(list_foods).post(create_food))
        .route(
            "/food/{id}",
            get(get_food).put(update_food).delete(delete_food),
        )
        .route("/food/title/{title}", get(search_by_title))
        .route("/food/restaurant/{id}", get(list_by_restaurant_id))
        .route(
            "/food/restaurant/name/{name}",
            get(list_by_restaurant_name),
        )
        .route_layer(middleware::from_fn(require_json_accept))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// Reject requests whose `Accept` header rules out JSON with 406
pub async fn require_json_accept(request: Request, next: Next) -> Response {
    if accepts_json(request.headers()) {
        return next.run(request).await;
    }

    let accept = request
        .headers()
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join(", ");
    tracing::debug!(accept = %accept, path = %request.uri().path(), "Rejecting non-JSON Accept");

    crate::core::ServiceError::from(RequestError::NotAcceptable { accept }).into_response()
}

/// Whether the `Accept` headers allow an `application/json` response
///
/// A missing header accepts anything. The most specific matching range
/// decides (`application/json` over `application/*` over `*/*`), and a range
/// with `q=0` refuses.
pub fn accepts_json(headers: &HeaderMap) -> bool {
    let mut values = headers.get_all(ACCEPT).iter().peekable();
    if values.peek().is_none() {
        return true;
    }

    let ranges: Vec<(String, bool)> = values
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(parse_media_range)
        .collect();

    ["application/json", "application/*", "*/*"]
        .iter()
        .find_map(|wanted| {
            let mut matching = ranges.iter().filter(|(media, _)| media.as_str() == *wanted).peekable();
            matching.peek()?;
            Some(matching.any(|(_, allowed)| *allowed))
        })
        .unwrap_or(false)
}

/// Lowercased media type of one range, and whether its quality is non-zero
fn parse_media_range(range: &str) -> (String, bool) {
    let mut parts = range.split(';');
    let media = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
    let allowed = parts
        .filter_map(|param| param.trim().split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, q)| q.trim().parse::<f32>().ok())
        .is_none_or(|q| q > 0.0);
    (media, allowed)
}
