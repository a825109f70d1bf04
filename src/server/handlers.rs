//! HTTP handlers for food operations
//!
//! Each handler performs one store interaction (or a lookup followed by one
//! mutation) and produces one response. Get-then-mutate is not atomic.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::core::error::{EntityError, StorageError, ValidationError};
use crate::core::{
    CallerIdentity, Food, FoodStore, FoodUpdate, HasIdentityResolver, IdentityResolver, NewFood,
    ServiceResult, ValidJson,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FoodStore>,
    pub identity_resolver: Arc<dyn IdentityResolver>,
    /// Upper bound for a single store call
    pub store_timeout: Duration,
}

impl AppState {
    /// Run a store call under the configured timeout, mapping failures to
    /// storage errors.
    async fn store_call<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = anyhow::Result<T>>,
    ) -> ServiceResult<T> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result.map_err(|e| StorageError::from_store(e).into()),
            Err(_) => Err(StorageError::Timeout {
                operation: operation.to_string(),
                millis: self.store_timeout.as_millis(),
            }
            .into()),
        }
    }

    async fn require(&self, id: &str) -> ServiceResult<Food> {
        self.store_call("find_by_id", self.store.find_by_id(id))
            .await?
            .ok_or_else(|| EntityError::not_found(id).into())
    }
}

impl HasIdentityResolver for AppState {
    fn identity_resolver(&self) -> Arc<dyn IdentityResolver> {
        self.identity_resolver.clone()
    }
}

/// GET /food
pub async fn list_foods(State(state): State<AppState>) -> ServiceResult<Json<Vec<Food>>> {
    let foods = state
        .store_call("find_all", state.store.find_all())
        .await?;
    tracing::debug!(count = foods.len(), "Listed foods");
    Ok(Json(foods))
}

/// GET /food/{id}
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<Food>> {
    state.require(&id).await.map(Json)
}

/// GET /food/title/{title}
pub async fn search_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ServiceResult<Json<Vec<Food>>> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingArgument {
            argument: "title".to_string(),
        }
        .into());
    }

    let foods = state
        .store_call(
            "find_by_title_containing",
            state.store.find_by_title_containing(&title),
        )
        .await?;
    tracing::debug!(title = %title, count = foods.len(), "Searched foods by title");
    Ok(Json(foods))
}

/// GET /food/restaurant/{id}
pub async fn list_by_restaurant_id(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> ServiceResult<Json<Vec<Food>>> {
    let foods = state
        .store_call(
            "find_by_restaurant_id",
            state.store.find_by_restaurant_id(&restaurant_id),
        )
        .await?;
    Ok(Json(foods))
}

/// GET /food/restaurant/name/{name}
///
/// The caller identity is resolved for logging only.
pub async fn list_by_restaurant_name(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(name): Path<String>,
) -> ServiceResult<Json<Vec<Food>>> {
    tracing::debug!(
        restaurant = %name,
        caller = caller.as_ref().map(|c| c.subject.as_str()).unwrap_or("anonymous"),
        "Listing foods by restaurant name"
    );

    let foods = state
        .store_call(
            "find_by_restaurant_name",
            state.store.find_by_restaurant_name(&name),
        )
        .await?;
    Ok(Json(foods))
}

/// POST /food
pub async fn create_food(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewFood>,
) -> ServiceResult<(StatusCode, Json<Food>)> {
    let food = payload.into_food();
    let saved = state.store_call("save", state.store.save(food)).await?;

    tracing::info!(food = %saved, "Created food");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /food/{id}
///
/// Only `title`, `image` and `description` change. A missing id is a 404.
pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(update): ValidJson<FoodUpdate>,
) -> ServiceResult<Json<Food>> {
    let mut food = state.require(&id).await?;
    food.apply_update(update);

    let saved = state.store_call("save", state.store.save(food)).await?;

    tracing::info!(food = %saved, "Updated food");
    Ok(Json(saved))
}

/// DELETE /food/{id}
pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<StatusCode> {
    let food = state.require(&id).await?;
    state
        .store_call("delete", state.store.delete(&food))
        .await?;

    tracing::info!(id = %id, "Deleted food");
    Ok(StatusCode::OK)
}
