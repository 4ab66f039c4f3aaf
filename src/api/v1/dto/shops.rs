/*
 * Responsibility
 * - Shops request/response DTOs
 * - The owner never comes from the payload; it is the authenticated subject
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::shop_repo::{NewShop, ShopPatch, ShopRow};
use crate::services::auth::identity::SubjectId;

const MIN_ADDRESS_CHARS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub image: Option<String>,
}

impl CreateShopRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.category_id <= 0 {
            return Err("category_id must be positive");
        }
        validate_common(self.address.as_deref(), self.image.as_deref())
    }

    pub fn into_new_shop(self, owner: SubjectId) -> NewShop {
        NewShop {
            owner,
            name: self.name.trim().to_string(),
            description: self.description,
            category_id: self.category_id,
            opens_at: self.opens_at,
            closes_at: self.closes_at,
            address: self.address,
            image: self.image,
        }
    }
}

/// Absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateShopRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub image: Option<String>,
}

impl UpdateShopRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(category_id) = self.category_id
            && category_id <= 0
        {
            return Err("category_id must be positive");
        }
        validate_common(self.address.as_deref(), self.image.as_deref())
    }

    pub fn into_patch(self) -> ShopPatch {
        ShopPatch {
            name: self.name.map(|name| name.trim().to_string()),
            description: self.description,
            category_id: self.category_id,
            opens_at: self.opens_at,
            closes_at: self.closes_at,
            address: self.address,
            image: self.image,
        }
    }
}

fn validate_common(address: Option<&str>, image: Option<&str>) -> Result<(), &'static str> {
    if let Some(address) = address
        && address.trim().chars().count() < MIN_ADDRESS_CHARS
    {
        return Err("address must be at least 5 characters");
    }
    if let Some(image) = image
        && !is_http_url(image)
    {
        return Err("image must be an absolute http(s) URL");
    }
    Ok(())
}

fn is_http_url(raw: &str) -> bool {
    url::Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShopResponse {
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

impl From<ShopRow> for ShopResponse {
    fn from(row: ShopRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            opens_at: row.opens_at,
            closes_at: row.closes_at,
            address: row.address,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
