//! Product Service
//!
//! CRUD and lookup operations over the product repository. Callers are
//! expected to have been authorized already; nothing here checks roles.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::ProductId;

use crate::domain::entities::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_objects::ProductDraft;
use crate::error::{InventoryError, InventoryResult};

pub struct ProductService<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every product, ordered by id
    pub async fn list(&self) -> InventoryResult<Vec<Product>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: ProductId) -> InventoryResult<Product> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(InventoryError::NotFound(id))
    }

    pub async fn create(&self, draft: ProductDraft, now: DateTime<Utc>) -> InventoryResult<Product> {
        let product = self.repo.insert(&draft, now).await?;
        tracing::info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> InventoryResult<Product> {
        let product = self
            .repo
            .update(id, &draft, now)
            .await?
            .ok_or(InventoryError::NotFound(id))?;
        tracing::info!(id = %product.id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: ProductId) -> InventoryResult<()> {
        if !self.repo.delete_by_id(id).await? {
            return Err(InventoryError::NotFound(id));
        }
        tracing::info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Case-insensitive substring match on the name
    pub async fn search_by_name(&self, fragment: &str) -> InventoryResult<Vec<Product>> {
        self.repo.search_by_name(fragment).await
    }

    pub async fn filter_by_color(&self, color: &str) -> InventoryResult<Vec<Product>> {
        self.repo.find_by_color(color).await
    }

    pub async fn filter_by_size(&self, size: &str) -> InventoryResult<Vec<Product>> {
        self.repo.find_by_size(size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryProductRepository;
    use chrono::{Duration, TimeZone};

    fn service() -> ProductService<InMemoryProductRepository> {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    fn draft(name: &str, color: &str, size: &str) -> ProductDraft {
        ProductDraft::new(name, None, color, size, None).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let created = service
            .create(draft("Silk Scarf", "blue", "M"), t0())
            .await
            .unwrap();

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp_only() {
        let service = service();
        let created = service
            .create(draft("Silk Scarf", "blue", "M"), t0())
            .await
            .unwrap();

        let later = t0() + Duration::minutes(5);
        let updated = service
            .update(created.id, draft("Silk Scarf", "green", "M"), later)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);
        assert_eq!(updated.color, "green");
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let service = service();
        let ghost = ProductId::new(99);

        assert!(matches!(
            service.get(ghost).await,
            Err(InventoryError::NotFound(id)) if id == ghost
        ));
        assert!(matches!(
            service.update(ghost, draft("a", "b", "c"), t0()).await,
            Err(InventoryError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(ghost).await,
            Err(InventoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let service = service();
        let created = service
            .create(draft("Wool Coat", "grey", "L"), t0())
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(InventoryError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(InventoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_and_filters() {
        let service = service();
        for (name, color, size) in [
            ("red silk", "red", "S"),
            ("Cotton Tee", "Red", "M"),
            ("Bored Linen", "white", "M"),
        ] {
            service.create(draft(name, color, size), t0()).await.unwrap();
        }

        let names: Vec<String> = service
            .search_by_name("Red")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["red silk", "Bored Linen"]);

        let red = service.filter_by_color("red").await.unwrap();
        assert_eq!(red.len(), 1);
        assert_eq!(red[0].name, "red silk");

        let medium = service.filter_by_size("M").await.unwrap();
        assert_eq!(medium.len(), 2);
        assert!(service.filter_by_size("m").await.unwrap().is_empty());
    }
}
