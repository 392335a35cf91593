use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use menuplan_shared::{
    CreateShoppingItemInput, DateRange, ShoppingListItem, UpdateShoppingItemInput,
};
use menuplan_shopping::{ShoppingGroup, group_by_dish};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, ValidatedJson};
use crate::routes::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShoppingListItem>>, AppError> {
    Ok(Json(state.store.list_shopping_items().await?))
}

pub async fn grouped(State(state): State<AppState>) -> Result<Json<Vec<ShoppingGroup>>, AppError> {
    let items = state.store.list_shopping_items().await?;

    Ok(Json(group_by_dish(items)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingListItem>, AppError> {
    match state.store.get_shopping_item(&id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(AppError::NotFound("Shopping list item")),
    }
}

#[tracing::instrument(skip_all, fields(name = %input.name))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateShoppingItemInput>,
) -> Result<(StatusCode, Json<ShoppingListItem>), AppError> {
    let item = state.store.create_shopping_item(input).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[tracing::instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateShoppingItemInput>,
) -> Result<Json<ShoppingListItem>, AppError> {
    let item = if input.is_empty() {
        state.store.get_shopping_item(&id).await?
    } else {
        state.store.update_shopping_item(&id, input).await?
    };

    item.map(Json).ok_or(AppError::NotFound("Shopping list item"))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_shopping_item(&id).await? {
        return Err(AppError::NotFound("Shopping list item"));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.clear_shopping_list().await?;
    tracing::info!("Shopping list cleared");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInput {
    #[validate(custom(function = "menuplan_shared::validate_iso_date"))]
    pub start_date: String,
    #[validate(custom(function = "menuplan_shared::validate_iso_date"))]
    pub end_date: String,
}

#[tracing::instrument(skip(state))]
pub async fn generate(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<GenerateInput>,
) -> Result<Json<Vec<ShoppingListItem>>, AppError> {
    let range = DateRange::new(input.start_date, input.end_date)?;
    let items = state.shopping_command.generate(&range).await?;

    Ok(Json(items))
}
