mod memory;

pub use memory::MemoryStore;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod sqlite;

        pub use sqlite::SqliteStore;
    }
}

use menuplan_shared::{
    CreateDishInput, CreateMealEventInput, CreateShoppingItemInput, DateRange, Dish, MealEvent,
    Result, ShoppingListItem, UpdateDishInput, UpdateMealEventInput, UpdateShoppingItemInput,
};
use std::sync::Mutex;

#[async_trait::async_trait]
pub trait DishStore: Send + Sync {
    async fn list_dishes(&self) -> Result<Vec<Dish>>;

    async fn get_dish(&self, id: &str) -> Result<Option<Dish>>;

    async fn create_dish(&self, input: CreateDishInput) -> Result<Dish>;

    async fn update_dish(&self, id: &str, input: UpdateDishInput) -> Result<Option<Dish>>;

    async fn delete_dish(&self, id: &str) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait MealEventStore: Send + Sync {
    async fn list_meal_events(&self) -> Result<Vec<MealEvent>>;

    /// Events whose span overlaps `range` (inclusive on both ends).
    async fn list_meal_events_in(&self, range: &DateRange) -> Result<Vec<MealEvent>>;

    async fn get_meal_event(&self, id: &str) -> Result<Option<MealEvent>>;

    async fn create_meal_event(&self, input: CreateMealEventInput) -> Result<MealEvent>;

    async fn update_meal_event(
        &self,
        id: &str,
        input: UpdateMealEventInput,
    ) -> Result<Option<MealEvent>>;

    async fn delete_meal_event(&self, id: &str) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait ShoppingListStore: Send + Sync {
    async fn list_shopping_items(&self) -> Result<Vec<ShoppingListItem>>;

    async fn get_shopping_item(&self, id: &str) -> Result<Option<ShoppingListItem>>;

    async fn create_shopping_item(&self, input: CreateShoppingItemInput)
    -> Result<ShoppingListItem>;

    async fn update_shopping_item(
        &self,
        id: &str,
        input: UpdateShoppingItemInput,
    ) -> Result<Option<ShoppingListItem>>;

    async fn delete_shopping_item(&self, id: &str) -> Result<bool>;

    async fn clear_shopping_list(&self) -> Result<()>;

    /// Deletes every item and inserts `items` as one atomic step: readers see
    /// either the previous list or the new one, never an empty list in between.
    async fn replace_shopping_list(
        &self,
        items: Vec<CreateShoppingItemInput>,
    ) -> Result<Vec<ShoppingListItem>>;
}

#[async_trait::async_trait]
pub trait Store: DishStore + MealEventStore + ShoppingListStore {
    async fn health_check(&self) -> Result<()>;
}

/// Monotonic ULIDs, so ordering by id is insertion order.
pub(crate) struct Ids(Mutex<ulid::Generator>);

impl Default for Ids {
    fn default() -> Self {
        Self(Mutex::new(ulid::Generator::new()))
    }
}

impl Ids {
    pub(crate) fn next(&self) -> Result<String> {
        let Ok(mut generator) = self.0.lock() else {
            menuplan_shared::bail!("id generator lock poisoned");
        };

        match generator.generate() {
            Ok(id) => Ok(id.to_string()),
            Err(err) => menuplan_shared::bail!("failed to generate id: {err}"),
        }
    }
}

pub(crate) fn now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
