use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;

use larder_types::{
    DeleteResponse, HealthResponse, LeftoverFood, LeftoverInput, LeftoverPatch, NewLeftover,
    RecordId,
};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `GET /leftovers`
pub async fn list_leftovers(State(state): State<AppState>) -> ServerResult<Json<Vec<LeftoverFood>>> {
    let foods = state.with_leftovers(|t| t.scan()).await?;
    tracing::debug!(count = foods.len(), "listed leftovers");
    Ok(Json(foods))
}

/// `POST /leftovers`
pub async fn create_leftover(
    State(state): State<AppState>,
    payload: Result<Json<LeftoverInput>, JsonRejection>,
) -> ServerResult<Json<LeftoverFood>> {
    let Json(input) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let draft = NewLeftover::try_from(input)?;
    let food = state.with_leftovers(move |t| t.insert(draft)).await?;
    tracing::info!(id = %food.id, name = %food.fields.name, "created leftover");
    Ok(Json(food))
}

/// `PUT /leftovers/:id`
pub async fn update_leftover(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LeftoverPatch>, JsonRejection>,
) -> ServerResult<Json<LeftoverFood>> {
    let Json(patch) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let id = RecordId::new(id);
    let lookup = id.clone();
    let updated = state
        .with_leftovers(move |t| t.update(&lookup, &patch))
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("leftover {id}")))?;
    tracing::info!(id = %updated.id, level = updated.fields.level, "updated leftover");
    Ok(Json(updated))
}

/// `DELETE /leftovers/:id`
pub async fn delete_leftover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<DeleteResponse>> {
    let id = RecordId::new(id);
    let key = id.clone();
    state.with_leftovers(move |t| t.remove(&key)).await?;
    tracing::info!(%id, "deleted leftover");
    Ok(Json(DeleteResponse::OK))
}
