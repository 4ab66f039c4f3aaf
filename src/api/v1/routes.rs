/*
 * Responsibility
 * - URL structure of v1
 * - Which guard covers which route is decided here and nowhere else
 *   - public: health, register, login, refresh
 *   - authenticated: /users/me, /shops
 *   - admin: /shops/category
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    health::health,
    shop_categories::{create_category, delete_category, get_category, update_category},
    shops::{create_shop, delete_shop, get_shop, update_shop},
    users::{login, me, refresh, register},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/refresh", post(refresh));

    let authenticated = Router::new()
        .route("/users/me", get(me))
        .route("/shops", post(create_shop))
        .route(
            "/shops/{shop_id}",
            get(get_shop).put(update_shop).delete(delete_shop),
        );

    let admin = Router::new()
        .route("/shops/category", post(create_category))
        .route(
            "/shops/category/{category_id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        );

    public
        .merge(access::apply(authenticated, state.clone()))
        .merge(access::apply_admin(admin, state))
}
