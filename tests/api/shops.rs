use reqwest::Method;
use serde_json::{Value, json};

use marketplace_api::services::auth::identity::Role;

use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn should_create_shop_owned_by_the_caller() {
    let app = TestApp::new().await;
    let owner = app.seed_user("owner@example.com", Role::Customer).await;
    let category = app.seed_category("Bakery").await;

    let response = app
        .send_json(
            Method::POST,
            "/shops",
            &app.access_token(owner),
            &json!({
                "name": "Corner Bakery",
                "category_id": category,
                "address": "12 High Street",
                "image": "https://cdn.example.com/bakery.png",
                "user_id": 999,
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user_id"], owner.get());
    assert_eq!(body["name"], "Corner Bakery");
}

#[tokio::test]
async fn should_return_404_for_unknown_category() {
    let app = TestApp::new().await;
    let owner = app.seed_user("owner@example.com", Role::Customer).await;

    let response = app
        .send_json(
            Method::POST,
            "/shops",
            &app.access_token(owner),
            &json!({ "name": "Corner Bakery", "category_id": 42 }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_400_for_invalid_image_url() {
    let app = TestApp::new().await;
    let owner = app.seed_user("owner@example.com", Role::Customer).await;
    let category = app.seed_category("Bakery").await;

    let response = app
        .send_json(
            Method::POST,
            "/shops",
            &app.access_token(owner),
            &json!({ "name": "Corner Bakery", "category_id": category, "image": "not a url" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn should_return_403_when_non_owner_deletes() {
    let app = TestApp::new().await;
    let owner = app.seed_user("owner@example.com", Role::Customer).await;
    let other = app.seed_user("other@example.com", Role::Customer).await;
    let category = app.seed_category("Bakery").await;
    let shop = app.shops.seed(owner.get(), category).await;

    let response = app
        .delete(&format!("/shops/{shop}"), &app.access_token(other))
        .await;

    assert_eq!(response.status().as_u16(), 403);
    assert!(app.shops.get(shop).await.is_some());
}

#[tokio::test]
async fn should_return_204_when_owner_deletes() {
    let app = TestApp::new().await;
    let owner = app.seed_user("owner@example.com", Role::Customer).await;
    let category = app.seed_category("Bakery").await;
    let shop = app.shops.seed(owner.get(), category).await;

    let response = app
        .delete(&format!("/shops/{shop}"), &app.access_token(owner))
        .await;

    assert_eq!(response.status().as_u16(), 204);
    assert!(app.shops.get(shop).await.is_none());
}

#[tokio::test]
async fn should_not_let_admin_role_bypass_ownership() {
    let app = TestApp::new().await;
    let owner = app.seed_user("owner@example.com", Role::Customer).await;
    let admin = app.seed_user("admin@example.com", Role::Admin).await;
    let category = app.seed_category("Bakery").await;
    let shop = app.shops.seed(owner.get(), category).await;

    let response = app
        .send_json(
            Method::PUT,
            &format!("/shops/{shop}"),
            &app.access_token(admin),
            &json!({ "name": "Hijacked" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(
        error_message(response).await,
        "you do not have permission to modify this resource"
    );
}

#[tokio::test]
async fn should_partially_update_for_owner() {
    let app = TestApp::new().await;
    let owner = app.seed_user("owner@example.com", Role::Customer).await;
    let category = app.seed_category("Bakery").await;
    let shop = app.shops.seed(owner.get(), category).await;

    let response = app
        .send_json(
            Method::PUT,
            &format!("/shops/{shop}"),
            &app.access_token(owner),
            &json!({ "address": "1 Market Square" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["address"], "1 Market Square");
    assert_eq!(body["name"], format!("shop {shop}"));
}

#[tokio::test]
async fn should_return_404_for_missing_shop() {
    let app = TestApp::new().await;
    let caller = app.seed_user("owner@example.com", Role::Customer).await;
    let token = app.access_token(caller);

    assert_eq!(app.get_authed("/shops/77", Some(&token)).await.status().as_u16(), 404);
    assert_eq!(app.delete("/shops/77", &token).await.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_400_for_non_numeric_id() {
    let app = TestApp::new().await;
    let caller = app.seed_user("owner@example.com", Role::Customer).await;

    let response = app
        .get_authed("/shops/abc", Some(&app.access_token(caller)))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await, "invalid id");
}

#[tokio::test]
async fn should_check_ownership_before_reading_the_update_body() {
    let app = TestApp::new().await;
    let owner = app.seed_user("owner@example.com", Role::Customer).await;
    let other = app.seed_user("other@example.com", Role::Customer).await;
    let category = app.seed_category("Bakery").await;
    let shop = app.shops.seed(owner.get(), category).await;
    let malformed = json!({ "name": 5 });

    let as_other = app
        .send_json(Method::PUT, &format!("/shops/{shop}"), &app.access_token(other), &malformed)
        .await;
    assert_eq!(as_other.status().as_u16(), 403);

    let as_owner = app
        .send_json(Method::PUT, &format!("/shops/{shop}"), &app.access_token(owner), &malformed)
        .await;
    assert_eq!(as_owner.status().as_u16(), 400);
    assert_eq!(app.shops.get(shop).await.unwrap().name, format!("shop {shop}"));
}
