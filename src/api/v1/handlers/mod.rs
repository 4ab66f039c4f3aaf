pub mod health;
pub mod shop_categories;
pub mod shops;
pub mod users;
