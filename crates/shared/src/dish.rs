use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use validator::Validate;

#[derive(
    EnumString,
    Display,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Validate, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[validate(length(min = 1, message = "Ingredient name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Ingredient quantity is required"))]
    pub quantity: String,
    #[validate(length(min = 1, message = "Ingredient unit is required"))]
    pub unit: String,
}

impl Ingredient {
    /// Merge identity: exact, case-sensitive name and unit.
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.unit)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub meal_type: MealType,
    pub ingredients: Vec<Ingredient>,
    pub created_at: i64,
}

#[derive(Validate, Default, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishInput {
    #[validate(length(min = 1, message = "Dish name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub meal_type: MealType,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<Ingredient>,
}

#[derive(Validate, Default, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDishInput {
    #[validate(length(min = 1, message = "Dish name is required"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::nullable")]
    pub description: Option<Option<String>>,
    pub meal_type: Option<MealType>,
    #[validate(nested)]
    pub ingredients: Option<Vec<Ingredient>>,
}

impl UpdateDishInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.meal_type.is_none()
            && self.ingredients.is_none()
    }

    pub fn apply(self, dish: &mut Dish) {
        if let Some(name) = self.name {
            dish.name = name;
        }

        if let Some(description) = self.description {
            dish.description = description;
        }

        if let Some(meal_type) = self.meal_type {
            dish.meal_type = meal_type;
        }

        if let Some(ingredients) = self.ingredients {
            dish.ingredients = ingredients;
        }
    }
}
