//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::ProductId;
use sqlx::PgPool;

use crate::domain::entities::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_objects::ProductDraft;
use crate::error::InventoryResult;

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, predicate: &str, arg: &str) -> InventoryResult<Vec<Product>> {
        let sql = format!(
            r#"
            SELECT
                id,
                name,
                description,
                color,
                size,
                image,
                created_at,
                updated_at
            FROM products
            WHERE {predicate}
            ORDER BY id
            "#
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(arg)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }
}

impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> InventoryResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id,
                name,
                description,
                color,
                size,
                image,
                created_at,
                updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> InventoryResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id,
                name,
                description,
                color,
                size,
                image,
                created_at,
                updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn insert(&self, draft: &ProductDraft, now: DateTime<Utc>) -> InventoryResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (
                name,
                description,
                color,
                size,
                image,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING
                id,
                name,
                description,
                color,
                size,
                image,
                created_at,
                updated_at
            "#,
        )
        .bind(draft.name())
        .bind(draft.description())
        .bind(draft.color())
        .bind(draft.size())
        .bind(draft.image())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_product())
    }

    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
        now: DateTime<Utc>,
    ) -> InventoryResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET
                name = $2,
                description = $3,
                color = $4,
                size = $5,
                image = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING
                id,
                name,
                description,
                color,
                size,
                image,
                created_at,
                updated_at
            "#,
        )
        .bind(id.value())
        .bind(draft.name())
        .bind(draft.description())
        .bind(draft.color())
        .bind(draft.size())
        .bind(draft.image())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn delete_by_id(&self, id: ProductId) -> InventoryResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_by_name(&self, fragment: &str) -> InventoryResult<Vec<Product>> {
        // strpos keeps `%` and `_` in the fragment literal
        self.fetch_where("strpos(lower(name), lower($1)) > 0", fragment)
            .await
    }

    async fn find_by_color(&self, color: &str) -> InventoryResult<Vec<Product>> {
        self.fetch_where("color = $1", color).await
    }

    async fn find_by_size(&self, size: &str) -> InventoryResult<Vec<Product>> {
        self.fetch_where("size = $1", size).await
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    color: String,
    size: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            color: self.color,
            size: self.size,
            image: self.image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
