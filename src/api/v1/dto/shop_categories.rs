use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::shop_category_repo::ShopCategoryRow;

/// Used for both create and update.
#[derive(Debug, Deserialize)]
pub struct ShopCategoryRequest {
    pub name: String,
}

impl ShopCategoryRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.name.trim()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShopCategoryResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShopCategoryRow> for ShopCategoryResponse {
    fn from(row: ShopCategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
