/*
 * Responsibility
 * - shop_categories CRUD (admin-managed)
 * - deleting a category that shops still reference surfaces as a conflict
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::lookup::ResourceLookup;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShopCategoryRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait ShopCategoryStore: ResourceLookup<ShopCategoryRow> {
    async fn create(&self, name: &str) -> RepoResult<ShopCategoryRow>;
    async fn update(&self, id: i64, name: &str) -> RepoResult<Option<ShopCategoryRow>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgShopCategoryRepo {
    pool: PgPool,
}

impl PgShopCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceLookup<ShopCategoryRow> for PgShopCategoryRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ShopCategoryRow>> {
        let row = sqlx::query_as::<_, ShopCategoryRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM shop_categories
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
impl ShopCategoryStore for PgShopCategoryRepo {
    async fn create(&self, name: &str) -> RepoResult<ShopCategoryRow> {
        let row = sqlx::query_as::<_, ShopCategoryRow>(
            r#"
            INSERT INTO shop_categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(&self, id: i64, name: &str) -> RepoResult<Option<ShopCategoryRow>> {
        let row = sqlx::query_as::<_, ShopCategoryRow>(
            r#"
            UPDATE shop_categories
            SET name = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM shop_categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
