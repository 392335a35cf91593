use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::MealEvent;

pub struct CreateTable;

// No foreign key on dish_id: events may outlive their dish.
fn create_table() -> TableCreateStatement {
    Table::create()
        .table(MealEvent::Table)
        .col(
            ColumnDef::new(MealEvent::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(MealEvent::DishId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(MealEvent::StartDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(MealEvent::EndDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(MealEvent::MealType)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(MealEvent::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(MealEvent::Table).to_owned()
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
