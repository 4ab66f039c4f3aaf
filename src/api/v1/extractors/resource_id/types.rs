/*
 * Responsibility
 *  - Declare one typed id per resource
 *  - Adding a resource means adding a tag and an alias here, nothing else
 */
use super::core::ResourceId;

// shops
pub enum ShopTag {}
pub type ShopId = ResourceId<ShopTag>;

// shop categories
pub enum ShopCategoryTag {}
pub type ShopCategoryId = ResourceId<ShopCategoryTag>;
