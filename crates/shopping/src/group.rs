use menuplan_shared::ShoppingListItem;
use serde::Serialize;

/// Items sharing a `dishName`. Items without one land in a single group with
/// `dish_name: None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingGroup {
    pub dish_name: Option<String>,
    pub planned_date: Option<String>,
    pub items: Vec<ShoppingListItem>,
}

/// Groups items by dish and sorts the groups by their earliest planned date.
/// Undated groups go last and ties keep first-appearance order.
pub fn group_by_dish(items: Vec<ShoppingListItem>) -> Vec<ShoppingGroup> {
    let mut groups: Vec<ShoppingGroup> = vec![];

    for item in items {
        let pos = match groups.iter().position(|g| g.dish_name == item.dish_name) {
            Some(pos) => pos,
            None => {
                groups.push(ShoppingGroup {
                    dish_name: item.dish_name.to_owned(),
                    planned_date: None,
                    items: vec![],
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[pos];
        if let Some(date) = &item.planned_date {
            match &group.planned_date {
                Some(current) if current <= date => {}
                _ => group.planned_date = Some(date.to_owned()),
            }
        }

        group.items.push(item);
    }

    groups.sort_by(|a, b| match (&a.planned_date, &b.planned_date) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    groups
}
