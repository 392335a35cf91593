use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use menuplan_shared::{CreateDishInput, Dish, UpdateDishInput};

use crate::error::{AppError, ValidatedJson};
use crate::routes::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Dish>>, AppError> {
    Ok(Json(state.store.list_dishes().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Dish>, AppError> {
    match state.store.get_dish(&id).await? {
        Some(dish) => Ok(Json(dish)),
        None => Err(AppError::NotFound("Dish")),
    }
}

#[tracing::instrument(skip_all, fields(name = %input.name))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateDishInput>,
) -> Result<(StatusCode, Json<Dish>), AppError> {
    let dish = state.store.create_dish(input).await?;
    tracing::info!(dish_id = %dish.id, ingredients = dish.ingredients.len(), "Dish created");

    Ok((StatusCode::CREATED, Json(dish)))
}

#[tracing::instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateDishInput>,
) -> Result<Json<Dish>, AppError> {
    let dish = if input.is_empty() {
        state.store.get_dish(&id).await?
    } else {
        state.store.update_dish(&id, input).await?
    };

    dish.map(Json).ok_or(AppError::NotFound("Dish"))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_dish(&id).await? {
        return Err(AppError::NotFound("Dish"));
    }

    Ok(StatusCode::NO_CONTENT)
}
