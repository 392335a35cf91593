use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Dish {
    Table,
    Id,
    Name,
    Description,
    MealType,
    Ingredients,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum MealEvent {
    Table,
    Id,
    DishId,
    StartDate,
    EndDate,
    MealType,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingListItem {
    Table,
    Id,
    Name,
    Quantity,
    Unit,
    IsCompleted,
    DishName,
    PlannedDate,
    CreatedAt,
}
