use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::ShoppingListItem;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingListItem::Table)
        .col(
            ColumnDef::new(ShoppingListItem::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(ShoppingListItem::Name).string().not_null())
        .col(
            ColumnDef::new(ShoppingListItem::Quantity)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(ShoppingListItem::Unit).string().not_null())
        .col(
            ColumnDef::new(ShoppingListItem::IsCompleted)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(ShoppingListItem::DishName).string().null())
        .col(
            ColumnDef::new(ShoppingListItem::PlannedDate)
                .string()
                .null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(ShoppingListItem::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ShoppingListItem::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
