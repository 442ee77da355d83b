//! In-memory product repository
//!
//! Used by tests and local runs without a database.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use kernel::id::ProductId;

use crate::domain::entities::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_objects::ProductDraft;
use crate::error::{InventoryError, InventoryResult};

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<ProductId, Product>,
}

/// Ids are handed out from a counter that never goes backwards, so a
/// deleted id is never reused.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    table: Arc<Mutex<Table>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> InventoryResult<MutexGuard<'_, Table>> {
        self.table
            .lock()
            .map_err(|_| InventoryError::Internal("product table lock poisoned".to_string()))
    }

    fn matching(&self, keep: impl Fn(&Product) -> bool) -> InventoryResult<Vec<Product>> {
        Ok(self
            .table()?
            .rows
            .values()
            .filter(|p| keep(p))
            .cloned()
            .collect())
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> InventoryResult<Vec<Product>> {
        self.matching(|_| true)
    }

    async fn find_by_id(&self, id: ProductId) -> InventoryResult<Option<Product>> {
        Ok(self.table()?.rows.get(&id).cloned())
    }

    async fn insert(&self, draft: &ProductDraft, now: DateTime<Utc>) -> InventoryResult<Product> {
        let mut table = self.table()?;
        table.last_id += 1;
        let product = Product::from_draft(ProductId::new(table.last_id), draft, now);
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
        now: DateTime<Utc>,
    ) -> InventoryResult<Option<Product>> {
        let mut table = self.table()?;
        Ok(table.rows.get_mut(&id).map(|product| {
            product.apply(draft, now);
            product.clone()
        }))
    }

    async fn delete_by_id(&self, id: ProductId) -> InventoryResult<bool> {
        Ok(self.table()?.rows.remove(&id).is_some())
    }

    async fn search_by_name(&self, fragment: &str) -> InventoryResult<Vec<Product>> {
        let needle = fragment.to_lowercase();
        self.matching(|p| p.name.to_lowercase().contains(&needle))
    }

    async fn find_by_color(&self, color: &str) -> InventoryResult<Vec<Product>> {
        self.matching(|p| p.color == color)
    }

    async fn find_by_size(&self, size: &str) -> InventoryResult<Vec<Product>> {
        self.matching(|p| p.size == size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let repo = InMemoryProductRepository::new();
        let draft = ProductDraft::new("Scarf", None, "red", "S", None).unwrap();
        let now = Utc::now();

        let first = repo.insert(&draft, now).await.unwrap();
        assert!(repo.delete_by_id(first.id).await.unwrap());
        let second = repo.insert(&draft, now).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
        assert!(!repo.delete_by_id(first.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_listing_is_ordered_by_id() {
        let repo = InMemoryProductRepository::new();
        let now = Utc::now();
        for name in ["c", "a", "b"] {
            let draft = ProductDraft::new(name, None, "red", "S", None).unwrap();
            repo.insert(&draft, now).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
