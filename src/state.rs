/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cloned per request, so everything inside is behind an Arc
 * - Stores are trait objects; tests swap in in-memory versions
 */
use std::sync::Arc;

use crate::repos::shop_category_repo::ShopCategoryStore;
use crate::repos::shop_repo::ShopStore;
use crate::repos::user_repo::UserStore;
use crate::services::auth::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub users: Arc<dyn UserStore>,
    pub shops: Arc<dyn ShopStore>,
    pub categories: Arc<dyn ShopCategoryStore>,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<dyn UserStore>,
        shops: Arc<dyn ShopStore>,
        categories: Arc<dyn ShopCategoryStore>,
    ) -> Self {
        Self {
            tokens,
            users,
            shops,
            categories,
        }
    }
}
