use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Response};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::sync::RwLock;

use marketplace_api::app::build_router;
use marketplace_api::config::Config;
use marketplace_api::repos::error::{RepoError, RepoResult};
use marketplace_api::repos::lookup::{ResourceLookup, UserLookup};
use marketplace_api::repos::shop_category_repo::{ShopCategoryRow, ShopCategoryStore};
use marketplace_api::repos::shop_repo::{NewShop, ShopPatch, ShopRow, ShopStore};
use marketplace_api::repos::user_repo::{NewUser, UserRow, UserStore};
use marketplace_api::services::auth::identity::{Role, SubjectId};
use marketplace_api::services::auth::password::hash_password;
use marketplace_api::services::auth::token_service::{TokenKind, TokenService};
use marketplace_api::state::AppState;

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "correct horse battery";

fn test_config(secret: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("DATABASE_URL", "postgres://unused".to_string()),
        ("JWT_SECRET", secret.to_string()),
        ("STATIC_DIR", "static".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config is valid")
}

/// Token service signing with a different secret than the server.
pub fn foreign_tokens() -> TokenService {
    TokenService::new(&test_config("some-other-secret-0123456789abcdef-xyz").auth)
}

fn unavailable() -> RepoError {
    RepoError::Db(sqlx::Error::PoolTimedOut)
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<UserRow>>,
    next_id: AtomicI64,
    pub create_calls: AtomicUsize,
    pub fail_lookups: AtomicBool,
}

impl MemoryUserStore {
    pub async fn remove(&self, id: SubjectId) {
        self.rows.write().await.retain(|row| row.id != id.get());
    }
}

#[async_trait]
impl UserLookup for MemoryUserStore {
    async fn find_by_id(&self, id: SubjectId) -> RepoResult<Option<UserRow>> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.rows.read().await.iter().find(|row| row.id == id.get()).cloned())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        Ok(self.rows.read().await.iter().find(|row| row.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> RepoResult<UserRow> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.email == user.email) {
            return Err(RepoError::Conflict);
        }
        let now = Utc::now();
        let row = UserRow {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role.as_str().to_string(),
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }
}

#[derive(Default)]
pub struct MemoryShopStore {
    rows: RwLock<Vec<ShopRow>>,
    next_id: AtomicI64,
}

impl MemoryShopStore {
    /// Insert a shop owned by `owner` without going through the API.
    pub async fn seed(&self, owner: i64, category_id: i64) -> i64 {
        let now = Utc::now();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rows.write().await.push(ShopRow {
            id,
            user_id: owner,
            name: format!("shop {id}"),
            description: None,
            category_id,
            opens_at: None,
            closes_at: None,
            address: None,
            image: None,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub async fn get(&self, id: i64) -> Option<ShopRow> {
        self.rows.read().await.iter().find(|row| row.id == id).cloned()
    }
}

#[async_trait]
impl ResourceLookup<ShopRow> for MemoryShopStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ShopRow>> {
        Ok(self.get(id).await)
    }
}

#[async_trait]
impl ShopStore for MemoryShopStore {
    async fn create(&self, shop: NewShop) -> RepoResult<ShopRow> {
        let now = Utc::now();
        let row = ShopRow {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: shop.owner.get(),
            name: shop.name,
            description: shop.description,
            category_id: shop.category_id,
            opens_at: shop.opens_at,
            closes_at: shop.closes_at,
            address: shop.address,
            image: shop.image,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, patch: ShopPatch) -> RepoResult<Option<ShopRow>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if patch.description.is_some() {
            row.description = patch.description;
        }
        if let Some(category_id) = patch.category_id {
            row.category_id = category_id;
        }
        if patch.opens_at.is_some() {
            row.opens_at = patch.opens_at;
        }
        if patch.closes_at.is_some() {
            row.closes_at = patch.closes_at;
        }
        if patch.address.is_some() {
            row.address = patch.address;
        }
        if patch.image.is_some() {
            row.image = patch.image;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryCategoryStore {
    rows: RwLock<Vec<ShopCategoryRow>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ResourceLookup<ShopCategoryRow> for MemoryCategoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ShopCategoryRow>> {
        Ok(self.rows.read().await.iter().find(|row| row.id == id).cloned())
    }
}

#[async_trait]
impl ShopCategoryStore for MemoryCategoryStore {
    async fn create(&self, name: &str) -> RepoResult<ShopCategoryRow> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.name == name) {
            return Err(RepoError::Conflict);
        }
        let now = Utc::now();
        let row = ShopCategoryRow {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, name: &str) -> RepoResult<Option<ShopCategoryRow>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        row.name = name.to_string();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }
}

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub tokens: Arc<TokenService>,
    pub users: Arc<MemoryUserStore>,
    pub shops: Arc<MemoryShopStore>,
    pub categories: Arc<MemoryCategoryStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = test_config(JWT_SECRET);
        let tokens = Arc::new(TokenService::new(&config.auth));
        let users = Arc::new(MemoryUserStore::default());
        let shops = Arc::new(MemoryShopStore::default());
        let categories = Arc::new(MemoryCategoryStore::default());
        let state = AppState::new(
            tokens.clone(),
            users.clone(),
            shops.clone(),
            categories.clone(),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed binding to an ephemeral port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server = axum::serve(listener, build_router(state, &config));
        spawn(async move {
            if let Err(e) = server.await {
                eprintln!("Test server error: {}", e);
            }
        });

        TestApp {
            address,
            http_client: Client::new(),
            tokens,
            users,
            shops,
            categories,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    /// Register through the store directly, bypassing the API (needed for admins).
    pub async fn seed_user(&self, email: &str, role: Role) -> SubjectId {
        let row = self
            .users
            .create(NewUser {
                first_name: "Test".into(),
                last_name: "User".into(),
                email: email.into(),
                phone_number: "0123456789".into(),
                role,
                password_hash: hash_password(PASSWORD).expect("hashing works"),
            })
            .await
            .expect("seed user");
        SubjectId::new(row.id).expect("positive id")
    }

    pub fn access_token(&self, subject: SubjectId) -> String {
        self.tokens.issue(subject, TokenKind::Access).expect("signing works")
    }

    pub async fn seed_category(&self, name: &str) -> i64 {
        self.categories.create(name).await.expect("seed category").id
    }

    pub async fn categories_contains(&self, id: i64) -> bool {
        self.categories
            .find_by_id(id)
            .await
            .expect("in-memory lookup")
            .is_some()
    }

    pub async fn register(&self, email: &str, password: &str) -> Response {
        self.http_client
            .post(self.url("/users/register"))
            .json(&json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": email,
                "phone_number": "+44 20 7946 0000",
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute register request.")
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.http_client
            .post(self.url("/users/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute login request.")
    }

    pub async fn refresh(&self, refresh_token: &str) -> Response {
        self.http_client
            .post(self.url("/users/refresh"))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .expect("Failed to execute refresh request.")
    }

    pub async fn get_authed(&self, path: &str, token: Option<&str>) -> Response {
        let mut request = self.http_client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute GET request.")
    }

    pub async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
        body: &Value,
    ) -> Response {
        self.http_client
            .request(method, self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str, token: &str) -> Response {
        self.http_client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute DELETE request.")
    }
}

pub async fn error_message(response: Response) -> String {
    let body: Value = response.json().await.expect("JSON error body");
    body["error"].as_str().expect("error field").to_string()
}
