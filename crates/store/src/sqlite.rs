use menuplan_db::table;
use menuplan_shared::{
    CreateDishInput, CreateMealEventInput, CreateShoppingItemInput, DateRange, Dish, Ingredient,
    MealEvent, MealType, Result, ShoppingListItem, UpdateDishInput, UpdateMealEventInput,
    UpdateShoppingItemInput,
};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{
    SqlitePool,
    prelude::FromRow,
    types::{Json, Text},
};
use std::sync::Arc;

use crate::{DishStore, Ids, MealEventStore, ShoppingListStore, Store, now};

/// Durable store backed by the sqlite tables created by `menuplan_db::migrate`.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    ids: Arc<Ids>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            ids: Arc::default(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(FromRow)]
struct DishRow {
    id: String,
    name: String,
    description: Option<String>,
    meal_type: Text<MealType>,
    ingredients: Json<Vec<Ingredient>>,
    created_at: i64,
}

impl From<DishRow> for Dish {
    fn from(row: DishRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            meal_type: row.meal_type.0,
            ingredients: row.ingredients.0,
            created_at: row.created_at,
        }
    }
}

fn dish_columns() -> [table::Dish; 6] {
    [
        table::Dish::Id,
        table::Dish::Name,
        table::Dish::Description,
        table::Dish::MealType,
        table::Dish::Ingredients,
        table::Dish::CreatedAt,
    ]
}

#[derive(FromRow)]
struct MealEventRow {
    id: String,
    dish_id: String,
    start_date: String,
    end_date: String,
    meal_type: Text<MealType>,
    created_at: i64,
}

impl From<MealEventRow> for MealEvent {
    fn from(row: MealEventRow) -> Self {
        Self {
            id: row.id,
            dish_id: row.dish_id,
            start_date: row.start_date,
            end_date: row.end_date,
            meal_type: row.meal_type.0,
            created_at: row.created_at,
        }
    }
}

fn meal_event_columns() -> [table::MealEvent; 6] {
    [
        table::MealEvent::Id,
        table::MealEvent::DishId,
        table::MealEvent::StartDate,
        table::MealEvent::EndDate,
        table::MealEvent::MealType,
        table::MealEvent::CreatedAt,
    ]
}

#[derive(FromRow)]
struct ShoppingListItemRow {
    id: String,
    name: String,
    quantity: String,
    unit: String,
    is_completed: bool,
    dish_name: Option<String>,
    planned_date: Option<String>,
    created_at: i64,
}

impl From<ShoppingListItemRow> for ShoppingListItem {
    fn from(row: ShoppingListItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            is_completed: row.is_completed,
            dish_name: row.dish_name,
            planned_date: row.planned_date,
            created_at: row.created_at,
        }
    }
}

fn shopping_item_columns() -> [table::ShoppingListItem; 8] {
    [
        table::ShoppingListItem::Id,
        table::ShoppingListItem::Name,
        table::ShoppingListItem::Quantity,
        table::ShoppingListItem::Unit,
        table::ShoppingListItem::IsCompleted,
        table::ShoppingListItem::DishName,
        table::ShoppingListItem::PlannedDate,
        table::ShoppingListItem::CreatedAt,
    ]
}

fn shopping_item_values(item: &ShoppingListItem) -> [Expr; 8] {
    [
        item.id.to_owned().into(),
        item.name.to_owned().into(),
        item.quantity.to_owned().into(),
        item.unit.to_owned().into(),
        item.is_completed.into(),
        item.dish_name.to_owned().into(),
        item.planned_date.to_owned().into(),
        item.created_at.into(),
    ]
}

impl SqliteStore {
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
impl DishStore for SqliteStore {
    async fn list_dishes(&self) -> Result<Vec<Dish>> {
        let statement = Query::select()
            .columns(dish_columns())
            .from(table::Dish::Table)
            .order_by(table::Dish::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, DishRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_dish(&self, id: &str) -> Result<Option<Dish>> {
        let statement = Query::select()
            .columns(dish_columns())
            .from(table::Dish::Table)
            .and_where(Expr::col(table::Dish::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, DishRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
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

        let ingredients = serde_json::to_string(&dish.ingredients)?;
        let statement = Query::insert()
            .into_table(table::Dish::Table)
            .columns(dish_columns())
            .values_panic([
                dish.id.to_owned().into(),
                dish.name.to_owned().into(),
                dish.description.to_owned().into(),
                dish.meal_type.as_ref().into(),
                ingredients.into(),
                dish.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(dish)
    }

    async fn update_dish(&self, id: &str, input: UpdateDishInput) -> Result<Option<Dish>> {
        let Some(mut dish) = self.get_dish(id).await? else {
            return Ok(None);
        };

        if input.is_empty() {
            return Ok(Some(dish));
        }

        input.apply(&mut dish);

        let ingredients = serde_json::to_string(&dish.ingredients)?;
        let statement = Query::update()
            .table(table::Dish::Table)
            .values([
                (table::Dish::Name, dish.name.to_owned().into()),
                (table::Dish::Description, dish.description.to_owned().into()),
                (table::Dish::MealType, dish.meal_type.as_ref().into()),
                (table::Dish::Ingredients, ingredients.into()),
            ])
            .and_where(Expr::col(table::Dish::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        // Deleted between the read and the write.
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(dish))
    }

    async fn delete_dish(&self, id: &str) -> Result<bool> {
        let statement = Query::delete()
            .from_table(table::Dish::Table)
            .and_where(Expr::col(table::Dish::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl MealEventStore for SqliteStore {
    async fn list_meal_events(&self) -> Result<Vec<MealEvent>> {
        let statement = Query::select()
            .columns(meal_event_columns())
            .from(table::MealEvent::Table)
            .order_by(table::MealEvent::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, MealEventRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_meal_events_in(&self, range: &DateRange) -> Result<Vec<MealEvent>> {
        let statement = Query::select()
            .columns(meal_event_columns())
            .from(table::MealEvent::Table)
            .and_where(Expr::col(table::MealEvent::StartDate).lte(&range.end_date))
            .and_where(Expr::col(table::MealEvent::EndDate).gte(&range.start_date))
            .order_by(table::MealEvent::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, MealEventRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_meal_event(&self, id: &str) -> Result<Option<MealEvent>> {
        let statement = Query::select()
            .columns(meal_event_columns())
            .from(table::MealEvent::Table)
            .and_where(Expr::col(table::MealEvent::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, MealEventRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
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

        let statement = Query::insert()
            .into_table(table::MealEvent::Table)
            .columns(meal_event_columns())
            .values_panic([
                event.id.to_owned().into(),
                event.dish_id.to_owned().into(),
                event.start_date.to_owned().into(),
                event.end_date.to_owned().into(),
                event.meal_type.as_ref().into(),
                event.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(event)
    }

    async fn update_meal_event(
        &self,
        id: &str,
        input: UpdateMealEventInput,
    ) -> Result<Option<MealEvent>> {
        let Some(mut event) = self.get_meal_event(id).await? else {
            return Ok(None);
        };

        if input.is_empty() {
            return Ok(Some(event));
        }

        input.apply(&mut event);

        let statement = Query::update()
            .table(table::MealEvent::Table)
            .values([
                (table::MealEvent::DishId, event.dish_id.to_owned().into()),
                (
                    table::MealEvent::StartDate,
                    event.start_date.to_owned().into(),
                ),
                (table::MealEvent::EndDate, event.end_date.to_owned().into()),
                (table::MealEvent::MealType, event.meal_type.as_ref().into()),
            ])
            .and_where(Expr::col(table::MealEvent::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(event))
    }

    async fn delete_meal_event(&self, id: &str) -> Result<bool> {
        let statement = Query::delete()
            .from_table(table::MealEvent::Table)
            .and_where(Expr::col(table::MealEvent::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl ShoppingListStore for SqliteStore {
    async fn list_shopping_items(&self) -> Result<Vec<ShoppingListItem>> {
        let statement = Query::select()
            .columns(shopping_item_columns())
            .from(table::ShoppingListItem::Table)
            .order_by(table::ShoppingListItem::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, ShoppingListItemRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_shopping_item(&self, id: &str) -> Result<Option<ShoppingListItem>> {
        let statement = Query::select()
            .columns(shopping_item_columns())
            .from(table::ShoppingListItem::Table)
            .and_where(Expr::col(table::ShoppingListItem::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, ShoppingListItemRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create_shopping_item(
        &self,
        input: CreateShoppingItemInput,
    ) -> Result<ShoppingListItem> {
        let item = self.new_shopping_item(input)?;

        let statement = Query::insert()
            .into_table(table::ShoppingListItem::Table)
            .columns(shopping_item_columns())
            .values_panic(shopping_item_values(&item))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(item)
    }

    async fn update_shopping_item(
        &self,
        id: &str,
        input: UpdateShoppingItemInput,
    ) -> Result<Option<ShoppingListItem>> {
        let Some(mut item) = self.get_shopping_item(id).await? else {
            return Ok(None);
        };

        if input.is_empty() {
            return Ok(Some(item));
        }

        input.apply(&mut item);

        let statement = Query::update()
            .table(table::ShoppingListItem::Table)
            .values([
                (table::ShoppingListItem::Name, item.name.to_owned().into()),
                (
                    table::ShoppingListItem::Quantity,
                    item.quantity.to_owned().into(),
                ),
                (table::ShoppingListItem::Unit, item.unit.to_owned().into()),
                (table::ShoppingListItem::IsCompleted, item.is_completed.into()),
                (
                    table::ShoppingListItem::DishName,
                    item.dish_name.to_owned().into(),
                ),
                (
                    table::ShoppingListItem::PlannedDate,
                    item.planned_date.to_owned().into(),
                ),
            ])
            .and_where(Expr::col(table::ShoppingListItem::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(item))
    }

    async fn delete_shopping_item(&self, id: &str) -> Result<bool> {
        let statement = Query::delete()
            .from_table(table::ShoppingListItem::Table)
            .and_where(Expr::col(table::ShoppingListItem::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_shopping_list(&self) -> Result<()> {
        let statement = Query::delete()
            .from_table(table::ShoppingListItem::Table)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

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

        let mut tx = self.pool.begin().await?;

        let statement = Query::delete()
            .from_table(table::ShoppingListItem::Table)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        // Keeps each statement under sqlite's bound parameter limit.
        for chunk in items.chunks(500) {
            let mut statement = Query::insert();
            statement
                .into_table(table::ShoppingListItem::Table)
                .columns(shopping_item_columns());

            for item in chunk {
                statement.values_panic(shopping_item_values(item));
            }

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::debug!(count = items.len(), "shopping list replaced");

        Ok(items)
    }
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;

        Ok(())
    }
}
