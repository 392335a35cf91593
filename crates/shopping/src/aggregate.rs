use menuplan_shared::{CreateShoppingItemInput, DateRange, Dish, MealEvent};
use std::collections::HashMap;

struct Accumulated<'a> {
    name: &'a str,
    unit: &'a str,
    quantity: String,
}

struct DishAccumulator<'a> {
    dish_name: &'a str,
    earliest_date: &'a str,
    ingredients: Vec<Accumulated<'a>>,
    index: HashMap<(&'a str, &'a str), usize>,
}

impl<'a> DishAccumulator<'a> {
    fn new(dish: &'a Dish, start_date: &'a str) -> Self {
        Self {
            dish_name: &dish.name,
            earliest_date: start_date,
            ingredients: vec![],
            index: HashMap::new(),
        }
    }

    fn add(&mut self, dish: &'a Dish) {
        for ingredient in dish.ingredients.iter() {
            match self.index.get(&ingredient.key()) {
                Some(pos) => {
                    let entry = &mut self.ingredients[*pos];
                    entry.quantity = add_quantities(
                        entry.name,
                        entry.unit,
                        &entry.quantity,
                        &ingredient.quantity,
                    );
                }
                None => {
                    self.index.insert(ingredient.key(), self.ingredients.len());
                    self.ingredients.push(Accumulated {
                        name: &ingredient.name,
                        unit: &ingredient.unit,
                        quantity: ingredient.quantity.to_owned(),
                    });
                }
            }
        }
    }
}

/// Merges the ingredients of every dish scheduled in `range` into shopping
/// list items.
///
/// Ingredients merge per dish on exact `(name, unit)`, and every event adds the
/// full ingredient list again, so a dish planned twice counts twice. Events
/// outside `range` are ignored even if the caller did not filter them. Events
/// whose dish cannot be resolved, or whose dish has no ingredients, contribute
/// nothing.
///
/// Items come out grouped by dish in order of first encounter, each stamped
/// with the dish name and the earliest `startDate` of that dish's events.
pub fn generate_shopping_list<'a>(
    range: &DateRange,
    events: &'a [MealEvent],
    resolve: impl Fn(&str) -> Option<&'a Dish>,
) -> Vec<CreateShoppingItemInput> {
    let mut dishes: Vec<DishAccumulator<'a>> = vec![];
    let mut by_dish: HashMap<&'a str, usize> = HashMap::new();

    for event in events.iter().filter(|event| event.overlaps(range)) {
        let Some(dish) = resolve(&event.dish_id) else {
            tracing::debug!(
                event_id = %event.id,
                dish_id = %event.dish_id,
                "dish not found, skipping event"
            );
            continue;
        };

        if dish.ingredients.is_empty() {
            continue;
        }

        let pos = *by_dish.entry(event.dish_id.as_str()).or_insert_with(|| {
            dishes.push(DishAccumulator::new(dish, &event.start_date));
            dishes.len() - 1
        });

        let acc = &mut dishes[pos];
        if event.start_date.as_str() < acc.earliest_date {
            acc.earliest_date = &event.start_date;
        }

        acc.add(dish);
    }

    dishes
        .into_iter()
        .flat_map(|acc| {
            let dish_name = acc.dish_name;
            let planned_date = acc.earliest_date;

            acc.ingredients
                .into_iter()
                .map(move |ingredient| CreateShoppingItemInput {
                    name: ingredient.name.to_owned(),
                    quantity: ingredient.quantity,
                    unit: ingredient.unit.to_owned(),
                    is_completed: false,
                    dish_name: Some(dish_name.to_owned()),
                    planned_date: Some(planned_date.to_owned()),
                })
        })
        .collect()
}

fn parse_quantity(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Sums two decimal strings. An operand that does not parse contributes
/// nothing and the other one is kept as written.
fn add_quantities(name: &str, unit: &str, current: &str, next: &str) -> String {
    match (parse_quantity(current), parse_quantity(next)) {
        (Some(a), Some(b)) => (a + b).to_string(),
        (Some(_), None) => {
            tracing::warn!(
                ingredient = name,
                unit,
                quantity = next,
                "unparsable quantity ignored"
            );
            current.to_owned()
        }
        (None, Some(_)) => {
            tracing::warn!(
                ingredient = name,
                unit,
                quantity = current,
                "unparsable quantity ignored"
            );
            next.to_owned()
        }
        (None, None) => {
            tracing::warn!(
                ingredient = name,
                unit,
                current,
                next,
                "unparsable quantities, keeping first"
            );
            current.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuplan_shared::{Ingredient, MealType};

    fn dish(id: &str, name: &str, ingredients: &[(&str, &str, &str)]) -> Dish {
        Dish {
            id: id.to_owned(),
            name: name.to_owned(),
            description: None,
            meal_type: MealType::Lunch,
            ingredients: ingredients
                .iter()
                .map(|(name, quantity, unit)| Ingredient {
                    name: name.to_string(),
                    quantity: quantity.to_string(),
                    unit: unit.to_string(),
                })
                .collect(),
            created_at: 0,
        }
    }

    fn event(dish_id: &str, start_date: &str, end_date: &str) -> MealEvent {
        MealEvent {
            id: format!("{dish_id}-{start_date}"),
            dish_id: dish_id.to_owned(),
            start_date: start_date.to_owned(),
            end_date: end_date.to_owned(),
            meal_type: MealType::Lunch,
            created_at: 0,
        }
    }

    fn run(
        range: (&str, &str),
        events: &[MealEvent],
        dishes: &[Dish],
    ) -> Vec<CreateShoppingItemInput> {
        let range = DateRange::new(range.0, range.1).unwrap();
        generate_shopping_list(&range, events, |id| dishes.iter().find(|d| d.id == id))
    }

    fn summary(items: &[CreateShoppingItemInput]) -> Vec<String> {
        let mut summary = items
            .iter()
            .map(|i| {
                format!(
                    "{} {} {} {}",
                    i.name,
                    i.unit,
                    i.quantity,
                    i.planned_date.as_deref().unwrap_or("-")
                )
            })
            .collect::<Vec<_>>();
        summary.sort();
        summary
    }

    #[test]
    fn test_repeated_dish_sums_per_event() {
        let dishes = vec![dish("a", "Plov", &[("rice", "300", "g"), ("meat", "400", "g")])];
        let events = vec![
            event("a", "2024-01-01", "2024-01-01"),
            event("a", "2024-01-03", "2024-01-03"),
        ];

        let items = run(("2024-01-01", "2024-01-07"), &events, &dishes);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "rice");
        assert_eq!(items[0].quantity, "600");
        assert_eq!(items[1].name, "meat");
        assert_eq!(items[1].quantity, "800");

        for item in items {
            assert_eq!(item.dish_name.as_deref(), Some("Plov"));
            assert_eq!(item.planned_date.as_deref(), Some("2024-01-01"));
            assert!(!item.is_completed);
        }
    }

    #[test]
    fn test_dangling_and_empty_dishes_are_skipped() {
        let dishes = vec![
            dish("a", "Soup", &[("carrot", "2", "pcs")]),
            dish("b", "Nothing", &[]),
        ];
        let events = vec![
            event("missing", "2024-01-02", "2024-01-02"),
            event("b", "2024-01-02", "2024-01-02"),
            event("a", "2024-01-03", "2024-01-03"),
        ];

        let items = run(("2024-01-01", "2024-01-07"), &events, &dishes);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "carrot");

        let items = run(("2024-01-01", "2024-01-07"), &events[..2], &dishes);
        assert!(items.is_empty());
    }

    #[test]
    fn test_same_name_different_unit_stays_separate() {
        let dishes = vec![
            dish("a", "Plov", &[("Рис", "300", "g")]),
            dish("b", "Porridge", &[("Рис", "1", "cup"), ("Рис", "100", "g")]),
        ];
        let events = vec![
            event("a", "2024-01-01", "2024-01-01"),
            event("b", "2024-01-02", "2024-01-02"),
        ];

        let items = run(("2024-01-01", "2024-01-07"), &events, &dishes);

        assert_eq!(
            summary(&items),
            vec![
                "Рис cup 1 2024-01-02",
                "Рис g 100 2024-01-02",
                "Рис g 300 2024-01-01",
            ]
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let dishes = vec![dish("a", "Salad", &[("Tomato", "1", "pcs"), ("tomato", "2", "pcs")])];
        let events = vec![event("a", "2024-01-01", "2024-01-01")];

        let items = run(("2024-01-01", "2024-01-01"), &events, &dishes);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_event_order_does_not_change_merged_set() {
        let dishes = vec![
            dish("a", "Plov", &[("rice", "300", "g"), ("meat", "400", "g")]),
            dish("b", "Salad", &[("tomato", "2", "pcs"), ("oil", "0.5", "tbsp")]),
        ];
        let events = vec![
            event("a", "2024-01-05", "2024-01-05"),
            event("b", "2024-01-02", "2024-01-03"),
            event("a", "2024-01-02", "2024-01-02"),
            event("b", "2024-01-06", "2024-01-06"),
        ];
        let mut reversed = events.clone();
        reversed.reverse();

        let forward = run(("2024-01-01", "2024-01-07"), &events, &dishes);
        let backward = run(("2024-01-01", "2024-01-07"), &reversed, &dishes);

        assert_eq!(summary(&forward), summary(&backward));
        assert_eq!(
            summary(&forward),
            vec![
                "meat g 800 2024-01-02",
                "oil tbsp 1 2024-01-02",
                "rice g 600 2024-01-02",
                "tomato pcs 4 2024-01-02",
            ]
        );
    }

    #[test]
    fn test_events_outside_range_are_ignored() {
        let dishes = vec![dish("a", "Plov", &[("rice", "300", "g")])];
        let events = vec![
            event("a", "2024-01-10", "2024-01-12"),
            event("a", "2023-12-01", "2023-12-31"),
        ];

        let items = run(("2024-01-11", "2024-01-20"), &events, &dishes);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, "300");
        assert_eq!(items[0].planned_date.as_deref(), Some("2024-01-10"));

        let items = run(("2024-01-01", "2024-01-09"), &events, &dishes);
        assert!(items.is_empty());
    }

    #[test]
    fn test_unparsable_quantity_keeps_other_operand() {
        let dishes = vec![
            dish("a", "Soup", &[("salt", "to taste", "pinch"), ("water", "1,5", "l")]),
            dish("b", "Stew", &[("salt", "2", "pinch"), ("water", "abc", "l")]),
        ];
        let events = vec![
            event("a", "2024-01-01", "2024-01-01"),
            event("a", "2024-01-02", "2024-01-02"),
            event("b", "2024-01-03", "2024-01-03"),
            event("b", "2024-01-04", "2024-01-04"),
        ];

        let items = run(("2024-01-01", "2024-01-07"), &events, &dishes);

        assert_eq!(
            summary(&items),
            vec![
                "salt pinch 4 2024-01-03",
                "salt pinch to taste 2024-01-01",
                "water l 3 2024-01-01",
                "water l abc 2024-01-03",
            ]
        );
    }

    #[test]
    fn test_add_quantities() {
        assert_eq!(add_quantities("n", "u", "300", "300"), "600");
        assert_eq!(add_quantities("n", "u", "0.5", "0.25"), "0.75");
        assert_eq!(add_quantities("n", "u", " 1,5 ", "1"), "2.5");
        assert_eq!(add_quantities("n", "u", "NaN", "2"), "2");
        assert_eq!(add_quantities("n", "u", "2", "inf"), "2");
        assert_eq!(add_quantities("n", "u", "a", "b"), "a");
    }
}
