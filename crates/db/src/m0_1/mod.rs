mod dish;
mod meal_event;
mod meal_event_date_idx;
mod shopping_list_item;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "menuplan",
    "m0_1",
    vec_box![],
    vec_box![
        dish::CreateTable,
        meal_event::CreateTable,
        meal_event_date_idx::Operation,
        shopping_list_item::CreateTable
    ]
);
