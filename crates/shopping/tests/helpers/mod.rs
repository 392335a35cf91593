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

/// Dinner dish from `(name, quantity, unit)` triples.
pub async fn dish(
    store: &dyn Store,
    name: &str,
    ingredients: &[(&str, &str, &str)],
) -> anyhow::Result<Dish> {
    let ingredients = ingredients
        .iter()
        .map(|(name, quantity, unit)| Ingredient {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        })
        .collect();

    Ok(store
        .create_dish(CreateDishInput {
            name: name.to_owned(),
            description: None,
            meal_type: MealType::Dinner,
            ingredients,
        })
        .await?)
}

pub async fn plan(
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
