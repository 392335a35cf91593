mod aggregate;
mod command;
mod group;

pub use aggregate::generate_shopping_list;
pub use command::Command;
pub use group::{ShoppingGroup, group_by_dish};
