pub mod auth_ctx;
pub mod json;
pub mod resource_id;

pub use auth_ctx::AuthCtxExtractor;
pub use json::JsonBody;
pub use resource_id::{ShopCategoryId, ShopId};
