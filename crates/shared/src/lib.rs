mod date;
pub mod dish;
mod error;
pub mod meal_event;
pub mod shopping;

pub use date::*;
pub use dish::{CreateDishInput, Dish, Ingredient, MealType, UpdateDishInput};
pub use error::*;
pub use meal_event::{CreateMealEventInput, MealEvent, UpdateMealEventInput};
pub use shopping::{CreateShoppingItemInput, ShoppingListItem, UpdateShoppingItemInput};

use serde::{Deserialize, Deserializer};

/// Keeps an explicit `null` apart from an absent field: absent stays `None`
/// through `#[serde(default)]`, `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
