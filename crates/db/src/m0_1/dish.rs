use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Dish;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Dish::Table)
        .col(
            ColumnDef::new(Dish::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Dish::Name).string().not_null())
        .col(ColumnDef::new(Dish::Description).string().null())
        .col(
            ColumnDef::new(Dish::MealType)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(Dish::Ingredients)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(ColumnDef::new(Dish::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Dish::Table).to_owned()
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
