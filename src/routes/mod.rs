use axum::{
    Router,
    routing::{get, post},
};
use menuplan_store::Store;
use std::sync::Arc;

use crate::error::AppError;

mod dishes;
mod health;
mod meal_events;
mod shopping_list;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub shopping_command: menuplan_shopping::Command,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            shopping_command: menuplan_shopping::Command(store.clone()),
            store,
        }
    }
}

pub async fn fallback() -> AppError {
    AppError::NotFound("Route")
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/dishes", get(dishes::list).post(dishes::create))
        .route(
            "/api/dishes/{id}",
            get(dishes::get).patch(dishes::update).delete(dishes::delete),
        )
        .route(
            "/api/meal-events",
            get(meal_events::list).post(meal_events::create),
        )
        .route(
            "/api/meal-events/{id}",
            get(meal_events::get)
                .patch(meal_events::update)
                .delete(meal_events::delete),
        )
        .route(
            "/api/shopping-list",
            get(shopping_list::list)
                .post(shopping_list::create)
                .delete(shopping_list::clear),
        )
        .route("/api/shopping-list/generate", post(shopping_list::generate))
        .route("/api/shopping-list/grouped", get(shopping_list::grouped))
        .route(
            "/api/shopping-list/{id}",
            get(shopping_list::get)
                .patch(shopping_list::update)
                .delete(shopping_list::delete),
        )
        .fallback(fallback)
        .with_state(app_state)
}
