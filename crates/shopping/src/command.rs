use menuplan_shared::{DateRange, Dish, Result, ShoppingListItem};
use menuplan_store::Store;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::generate_shopping_list;

#[derive(Clone)]
pub struct Command(pub Arc<dyn Store>);

impl Command {
    /// Rebuilds the shopping list from every meal event overlapping `range`.
    ///
    /// The previous list is replaced in one step, including items added by
    /// hand.
    #[tracing::instrument(skip_all, fields(start_date = %range.start_date, end_date = %range.end_date))]
    pub async fn generate(&self, range: &DateRange) -> Result<Vec<ShoppingListItem>> {
        let events = self.0.list_meal_events_in(range).await?;

        let mut seen = HashSet::new();
        let dish_ids = events
            .iter()
            .map(|event| event.dish_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect::<Vec<_>>();

        let dishes = futures::future::try_join_all(dish_ids.iter().map(|id| self.0.get_dish(id)))
            .await?
            .into_iter()
            .flatten()
            .map(|dish| (dish.id.to_owned(), dish))
            .collect::<HashMap<String, Dish>>();

        let items = generate_shopping_list(range, &events, |id| dishes.get(id));
        let items = self.0.replace_shopping_list(items).await?;

        tracing::info!(
            events = events.len(),
            dishes = dishes.len(),
            items = items.len(),
            "shopping list generated"
        );

        Ok(items)
    }
}
