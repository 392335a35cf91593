#![allow(dead_code)]

use menuplan_shared::{
    CreateDishInput, CreateMealEventInput, Dish, Ingredient, MealEvent, MealType,
};
use menuplan_store::{SqliteStore, Store};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::{path::PathBuf, str::FromStr};

pub async fn setup_sqlite_store(path: PathBuf) -> anyhow::Result<SqliteStore> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    menuplan_db::migrate(&pool).await?;

    Ok(SqliteStore::new(pool))
}

pub fn ingredient(name: &str, quantity: &str, unit: &str) -> Ingredient {
    Ingredient {
        name: name.to_owned(),
        quantity: quantity.to_owned(),
        unit: unit.to_owned(),
    }
}

pub async fn create_dish(
    store: &dyn Store,
    name: &str,
    ingredients: Vec<Ingredient>,
) -> anyhow::Result<Dish> {
    Ok(store
        .create_dish(CreateDishInput {
            name: name.to_owned(),
            description: None,
            meal_type: MealType::Dinner,
            ingredients,
        })
        .await?)
}

pub async fn create_event(
    store: &dyn Store,
    dish_id: &str,
    start_date: &str,
    end_date: &str,
) -> anyhow::Result<MealEvent> {
    Ok(store
        .create_meal_event(CreateMealEventInput {
            dish_id: dish_id.to_owned(),
            start_date: start_date.to_owned(),
            end_date: end_date.to_owned(),
            meal_type: MealType::Dinner,
        })
        .await?)
}
