//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::ProductId;

use crate::domain::entities::Product;
use crate::domain::value_objects::ProductDraft;
use crate::error::InventoryResult;

/// Product repository trait
///
/// Listing methods return products ordered by id.
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    async fn find_all(&self) -> InventoryResult<Vec<Product>>;

    async fn find_by_id(&self, id: ProductId) -> InventoryResult<Option<Product>>;

    /// Insert with a fresh id; `created_at = updated_at = now`
    async fn insert(&self, draft: &ProductDraft, now: DateTime<Utc>) -> InventoryResult<Product>;

    /// Overwrite mutable fields and set `updated_at = now`.
    /// `None` when no product has this id.
    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
        now: DateTime<Utc>,
    ) -> InventoryResult<Option<Product>>;

    /// `false` when no product had this id
    async fn delete_by_id(&self, id: ProductId) -> InventoryResult<bool>;

    /// Case-insensitive substring match on `name`
    async fn search_by_name(&self, fragment: &str) -> InventoryResult<Vec<Product>>;

    /// Exact match on `color`
    async fn find_by_color(&self, color: &str) -> InventoryResult<Vec<Product>>;

    /// Exact match on `size`
    async fn find_by_size(&self, size: &str) -> InventoryResult<Vec<Product>>;
}
