use menuplan_shared::{
    CreateDishInput, CreateMealEventInput, CreateShoppingItemInput, DateRange, Dish, MealEvent,
    Result, ShoppingListItem, UpdateDishInput, UpdateMealEventInput, UpdateShoppingItemInput,
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::{DishStore, Ids, MealEventStore, ShoppingListStore, Store, now};

/// Volatile store. Every map is keyed by monotonic id, so iteration follows
/// insertion order.
#[derive(Default)]
pub struct MemoryStore {
    ids: Ids,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    dishes: BTreeMap<String, Dish>,
    meal_events: BTreeMap<String, MealEvent>,
    shopping_items: BTreeMap<String, ShoppingListItem>,
}

impl MemoryStore {
    fn new_shopping_item(&self, input: CreateShoppingItemInput) -> Result<ShoppingListItem> {
        Ok(ShoppingListItem {
            id: self.ids.next()?,
            name: input.name,
            quantity: input.quantity,
            unit: input.unit,
            is_completed: input.is_completed,
            dish_name: input.dish_name,
            planned_date: input.planned_date,
            created_at: now(),
        })
    }
}

#[async_trait::async_trait]
impl DishStore for MemoryStore {
    async fn list_dishes(&self) -> Result<Vec<Dish>> {
        Ok(self.state.read().await.dishes.values().cloned().collect())
    }

    async fn get_dish(&self, id: &str) -> Result<Option<Dish>> {
        Ok(self.state.read().await.dishes.get(id).cloned())
    }

    async fn create_dish(&self, input: CreateDishInput) -> Result<Dish> {
        let dish = Dish {
            id: self.ids.next()?,
            name: input.name,
            description: input.description,
            meal_type: input.meal_type,
            ingredients: input.ingredients,
            created_at: now(),
        };

        self.state
            .write()
            .await
            .dishes
            .insert(dish.id.to_owned(), dish.clone());

        Ok(dish)
    }

    async fn update_dish(&self, id: &str, input: UpdateDishInput) -> Result<Option<Dish>> {
        let mut state = self.state.write().await;
        let Some(dish) = state.dishes.get_mut(id) else {
            return Ok(None);
        };

        input.apply(dish);

        Ok(Some(dish.clone()))
    }

    async fn delete_dish(&self, id: &str) -> Result<bool> {
        Ok(self.state.write().await.dishes.remove(id).is_some())
    }
}

#[async_trait::async_trait]
impl MealEventStore for MemoryStore {
    async fn list_meal_events(&self) -> Result<Vec<MealEvent>> {
        Ok(self.state.read().await.meal_events.values().cloned().collect())
    }

    async fn list_meal_events_in(&self, range: &DateRange) -> Result<Vec<MealEvent>> {
        Ok(self
            .state
            .read()
            .await
            .meal_events
            .values()
            .filter(|event| event.overlaps(range))
            .cloned()
            .collect())
    }

    async fn get_meal_event(&self, id: &str) -> Result<Option<MealEvent>> {
        Ok(self.state.read().await.meal_events.get(id).cloned())
    }

    async fn create_meal_event(&self, input: CreateMealEventInput) -> Result<MealEvent> {
        let event = MealEvent {
            id: self.ids.next()?,
            dish_id: input.dish_id,
            start_date: input.start_date,
            end_date: input.end_date,
            meal_type: input.meal_type,
            created_at: now(),
        };

        self.state
            .write()
            .await
            .meal_events
            .insert(event.id.to_owned(), event.clone());

        Ok(event)
    }

    async fn update_meal_event(
        &self,
        id: &str,
        input: UpdateMealEventInput,
    ) -> Result<Option<MealEvent>> {
        let mut state = self.state.write().await;
        let Some(event) = state.meal_events.get_mut(id) else {
            return Ok(None);
        };

        input.apply(event);

        Ok(Some(event.clone()))
    }

    async fn delete_meal_event(&self, id: &str) -> Result<bool> {
        Ok(self.state.write().await.meal_events.remove(id).is_some())
    }
}

#[async_trait::async_trait]
impl ShoppingListStore for MemoryStore {
    async fn list_shopping_items(&self) -> Result<Vec<ShoppingListItem>> {
        Ok(self
            .state
            .read()
            .await
            .shopping_items
            .values()
            .cloned()
            .collect())
    }

    async fn get_shopping_item(&self, id: &str) -> Result<Option<ShoppingListItem>> {
        Ok(self.state.read().await.shopping_items.get(id).cloned())
    }

    async fn create_shopping_item(
        &self,
        input: CreateShoppingItemInput,
    ) -> Result<ShoppingListItem> {
        let item = self.new_shopping_item(input)?;

        self.state
            .write()
            .await
            .shopping_items
            .insert(item.id.to_owned(), item.clone());

        Ok(item)
    }

    async fn update_shopping_item(
        &self,
        id: &str,
        input: UpdateShoppingItemInput,
    ) -> Result<Option<ShoppingListItem>> {
        let mut state = self.state.write().await;
        let Some(item) = state.shopping_items.get_mut(id) else {
            return Ok(None);
        };

        input.apply(item);

        Ok(Some(item.clone()))
    }

    async fn delete_shopping_item(&self, id: &str) -> Result<bool> {
        Ok(self.state.write().await.shopping_items.remove(id).is_some())
    }

    async fn clear_shopping_list(&self) -> Result<()> {
        self.state.write().await.shopping_items.clear();

        Ok(())
    }

    async fn replace_shopping_list(
        &self,
        items: Vec<CreateShoppingItemInput>,
    ) -> Result<Vec<ShoppingListItem>> {
        let items = items
            .into_iter()
            .map(|input| self.new_shopping_item(input))
            .collect::<Result<Vec<_>>>()?;

        let mut state = self.state.write().await;
        state.shopping_items = items
            .iter()
            .map(|item| (item.id.to_owned(), item.clone()))
            .collect();

        Ok(items)
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
