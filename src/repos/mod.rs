pub mod error;
pub mod lookup;
pub mod shop_category_repo;
pub mod shop_repo;
pub mod user_repo;
