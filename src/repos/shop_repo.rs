/*
 * Responsibility
 * - shops CRUD
 * - user_id (owner) is written once on insert and never touched by update
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::lookup::ResourceLookup;
use crate::services::auth::identity::SubjectId;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShopRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewShop {
    pub owner: SubjectId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub image: Option<String>,
}

/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ShopPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub image: Option<String>,
}

#[async_trait]
pub trait ShopStore: ResourceLookup<ShopRow> {
    async fn create(&self, shop: NewShop) -> RepoResult<ShopRow>;
    async fn update(&self, id: i64, patch: ShopPatch) -> RepoResult<Option<ShopRow>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgShopRepo {
    pool: PgPool,
}

impl PgShopRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceLookup<ShopRow> for PgShopRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ShopRow>> {
        let row = sqlx::query_as::<_, ShopRow>(
            r#"
            SELECT id, user_id, name, description, category_id, opens_at, closes_at,
                   address, image, created_at, updated_at
            FROM shops
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl ShopStore for PgShopRepo {
    async fn create(&self, shop: NewShop) -> RepoResult<ShopRow> {
        let row = sqlx::query_as::<_, ShopRow>(
            r#"
            INSERT INTO shops
                (user_id, name, description, category_id, opens_at, closes_at, address, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, name, description, category_id, opens_at, closes_at,
                      address, image, created_at, updated_at
            "#,
        )
        .bind(shop.owner.get())
        .bind(&shop.name)
        .bind(&shop.description)
        .bind(shop.category_id)
        .bind(shop.opens_at)
        .bind(shop.closes_at)
        .bind(&shop.address)
        .bind(&shop.image)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(&self, id: i64, patch: ShopPatch) -> RepoResult<Option<ShopRow>> {
        let row = sqlx::query_as::<_, ShopRow>(
            r#"
            UPDATE shops
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category_id = COALESCE($4, category_id),
                opens_at = COALESCE($5, opens_at),
                closes_at = COALESCE($6, closes_at),
                address = COALESCE($7, address),
                image = COALESCE($8, image),
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, name, description, category_id, opens_at, closes_at,
                      address, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.category_id)
        .bind(patch.opens_at)
        .bind(patch.closes_at)
        .bind(&patch.address)
        .bind(&patch.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM shops
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
