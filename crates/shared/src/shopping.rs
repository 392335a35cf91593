use serde::{Deserialize, Deserializer, Serialize, de};
use validator::{Validate, ValidationError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub is_completed: bool,
    pub dish_name: Option<String>,
    pub planned_date: Option<String>,
    pub created_at: i64,
}

#[derive(Validate, Default, Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShoppingItemInput {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Item quantity is required"))]
    pub quantity: String,
    #[validate(length(min = 1, message = "Item unit is required"))]
    pub unit: String,
    #[serde(default, deserialize_with = "deserialize_completed")]
    pub is_completed: bool,
    #[serde(default)]
    pub dish_name: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "crate::validate_iso_date"))]
    pub planned_date: Option<String>,
}

#[derive(Validate, Default, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_planned_date"))]
pub struct UpdateShoppingItemInput {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Item quantity is required"))]
    pub quantity: Option<String>,
    #[validate(length(min = 1, message = "Item unit is required"))]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "deserialize_completed_opt")]
    pub is_completed: Option<bool>,
    #[serde(default, deserialize_with = "crate::nullable")]
    pub dish_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::nullable")]
    pub planned_date: Option<Option<String>>,
}

fn validate_update_planned_date(input: &UpdateShoppingItemInput) -> Result<(), ValidationError> {
    match &input.planned_date {
        Some(Some(date)) => crate::validate_iso_date(date),
        _ => Ok(()),
    }
}

impl UpdateShoppingItemInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.unit.is_none()
            && self.is_completed.is_none()
            && self.dish_name.is_none()
            && self.planned_date.is_none()
    }

    pub fn apply(self, item: &mut ShoppingListItem) {
        if let Some(name) = self.name {
            item.name = name;
        }

        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }

        if let Some(unit) = self.unit {
            item.unit = unit;
        }

        if let Some(is_completed) = self.is_completed {
            item.is_completed = is_completed;
        }

        if let Some(dish_name) = self.dish_name {
            item.dish_name = dish_name;
        }

        if let Some(planned_date) = self.planned_date {
            item.planned_date = planned_date;
        }
    }
}

/// Older clients send `isCompleted` as the strings `"true"` / `"false"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Completed {
    Bool(bool),
    Text(String),
}

impl Completed {
    fn into_bool<E: de::Error>(self) -> Result<bool, E> {
        match self {
            Completed::Bool(value) => Ok(value),
            Completed::Text(text) => match text.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(E::custom(format!(
                    "invalid isCompleted value '{other}', expected true or false"
                ))),
            },
        }
    }
}

fn deserialize_completed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Completed::deserialize(deserializer)?.into_bool()
}

fn deserialize_completed_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    Option::<Completed>::deserialize(deserializer)?
        .map(Completed::into_bool)
        .transpose()
}
