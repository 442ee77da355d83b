//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::ProductId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::Product;
use crate::domain::value_objects::ProductDraft;
use crate::error::InventoryError;

/// Body for POST /api/products and PUT /api/products/{id}
///
/// Required fields default to empty so a missing field is reported by
/// validation rather than as a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl TryFrom<ProductRequest> for ProductDraft {
    type Error = InventoryError;

    fn try_from(req: ProductRequest) -> Result<Self, Self::Error> {
        ProductDraft::new(req.name, req.description, req.color, req.size, req.image)
    }
}

/// Product as returned by every product endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub size: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            color: p.color,
            size: p.size,
            image: p.image,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Query for GET /api/products/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

/// `{"message": ...}` confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for POST /api/products/images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    /// Stored filename, usable as a product `image` reference
    pub filename: String,
    /// Public path the file is served from
    pub url: String,
}

impl ImageUploadResponse {
    pub fn new(filename: String) -> Self {
        let url = format!("{IMAGE_URL_PREFIX}/{filename}");
        Self { filename, url }
    }
}

/// Public mount point of the image directory
pub const IMAGE_URL_PREFIX: &str = "/uploads/images";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fail_validation() {
        let req: ProductRequest = serde_json::from_str(r#"{"name":"Scarf"}"#).unwrap();
        let err = ProductDraft::try_from(req).unwrap_err();
        assert_eq!(
            err.to_string(),
            "color: Color is required, size: Size is required"
        );
    }

    #[test]
    fn test_response_uses_camel_case() {
        let now = Utc::now();
        let draft = ProductDraft::new("Scarf", None, "red", "S", None).unwrap();
        let json =
            serde_json::to_value(ProductResponse::from(Product::from_draft(ProductId::new(1), &draft, now)))
                .unwrap();

        assert_eq!(json["id"], 1);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json["description"].is_null());
    }

    #[test]
    fn test_upload_url() {
        let resp = ImageUploadResponse::new("1_abc.png".into());
        assert_eq!(resp.url, "/uploads/images/1_abc.png");
    }
}
