use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use menuplan_shared::{CreateMealEventInput, DateRange, MealEvent, UpdateMealEventInput};
use serde::Deserialize;

use crate::error::{AppError, ValidatedJson};
use crate::routes::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub week: Option<String>,
    pub month: Option<String>,
}

impl ListQuery {
    /// Explicit bounds win over `week`, which wins over `month`. `None` means
    /// no filter.
    fn range(self) -> menuplan_shared::Result<Option<DateRange>> {
        if let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) {
            return DateRange::new(start_date, end_date).map(Some);
        }

        if let Some(week) = self.week {
            return DateRange::week_of(&week).map(Some);
        }

        if let Some(month) = self.month {
            return DateRange::month_of(&month).map(Some);
        }

        Ok(None)
    }
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<MealEvent>>, AppError> {
    let Query(query) = query?;

    let events = match query.range()? {
        Some(range) => state.store.list_meal_events_in(&range).await?,
        None => state.store.list_meal_events().await?,
    };

    Ok(Json(events))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MealEvent>, AppError> {
    match state.store.get_meal_event(&id).await? {
        Some(event) => Ok(Json(event)),
        None => Err(AppError::NotFound("Meal event")),
    }
}

#[tracing::instrument(skip_all, fields(dish_id = %input.dish_id))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMealEventInput>,
) -> Result<(StatusCode, Json<MealEvent>), AppError> {
    let event = state.store.create_meal_event(input).await?;
    tracing::info!(event_id = %event.id, start_date = %event.start_date, end_date = %event.end_date, "Meal event created");

    Ok((StatusCode::CREATED, Json(event)))
}

#[tracing::instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateMealEventInput>,
) -> Result<Json<MealEvent>, AppError> {
    let event = if input.is_empty() {
        state.store.get_meal_event(&id).await?
    } else {
        state.store.update_meal_event(&id, input).await?
    };

    event.map(Json).ok_or(AppError::NotFound("Meal event"))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_meal_event(&id).await? {
        return Err(AppError::NotFound("Meal event"));
    }

    Ok(StatusCode::NO_CONTENT)
}
