use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{DateRange, MealType};

/// A dish scheduled over an inclusive `start_date..=end_date` span.
///
/// `dish_id` is not checked against the dish store and may dangle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEvent {
    pub id: String,
    pub dish_id: String,
    pub start_date: String,
    pub end_date: String,
    pub meal_type: MealType,
    pub created_at: i64,
}

impl MealEvent {
    pub fn overlaps(&self, range: &DateRange) -> bool {
        range.overlaps(&self.start_date, &self.end_date)
    }
}

#[derive(Validate, Default, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealEventInput {
    #[validate(length(min = 1, message = "Dish is required"))]
    pub dish_id: String,
    #[validate(custom(function = "crate::validate_iso_date"))]
    pub start_date: String,
    #[validate(custom(function = "crate::validate_iso_date"))]
    pub end_date: String,
    pub meal_type: MealType,
}

#[derive(Validate, Default, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealEventInput {
    #[validate(length(min = 1, message = "Dish is required"))]
    pub dish_id: Option<String>,
    #[validate(custom(function = "crate::validate_iso_date"))]
    pub start_date: Option<String>,
    #[validate(custom(function = "crate::validate_iso_date"))]
    pub end_date: Option<String>,
    pub meal_type: Option<MealType>,
}

impl UpdateMealEventInput {
    pub fn is_empty(&self) -> bool {
        self.dish_id.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.meal_type.is_none()
    }

    pub fn apply(self, event: &mut MealEvent) {
        if let Some(dish_id) = self.dish_id {
            event.dish_id = dish_id;
        }

        if let Some(start_date) = self.start_date {
            event.start_date = start_date;
        }

        if let Some(end_date) = self.end_date {
            event.end_date = end_date;
        }

        if let Some(meal_type) = self.meal_type {
            event.meal_type = meal_type;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start_date: &str, end_date: &str) -> MealEvent {
        MealEvent {
            id: "e".to_owned(),
            dish_id: "d".to_owned(),
            start_date: start_date.to_owned(),
            end_date: end_date.to_owned(),
            meal_type: MealType::Lunch,
            created_at: 0,
        }
    }

    #[test]
    fn test_event_overlap() {
        let event = event("2024-01-10", "2024-01-12");

        let inside = DateRange::new("2024-01-11", "2024-01-20").unwrap();
        let before = DateRange::new("2024-01-01", "2024-01-09").unwrap();

        assert!(event.overlaps(&inside));
        assert!(!event.overlaps(&before));
    }

    #[test]
    fn test_create_input_validates_dates() {
        let input: CreateMealEventInput = serde_json::from_str(
            r#"{"dishId":"d","startDate":"2024-01-10","endDate":"10/01/2024","mealType":"lunch"}"#,
        )
        .unwrap();

        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }
}
