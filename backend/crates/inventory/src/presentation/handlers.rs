//! HTTP Handlers
//!
//! Role checks happen in the request gate before any of these run.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use chrono::Utc;
use kernel::error::app_error::AppError;
use kernel::id::ProductId;
use platform::storage::{ImageStorage, StorageError};

use crate::application::ProductService;
use crate::domain::entities::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_objects::ProductDraft;
use crate::error::{InventoryError, InventoryResult};
use crate::presentation::dto::{
    ImageUploadResponse, MessageResponse, ProductRequest, ProductResponse, SearchQuery,
};

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

/// Shared state for inventory handlers
#[derive(Clone)]
pub struct InventoryAppState<R>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub images: Arc<ImageStorage>,
}

impl<R> InventoryAppState<R>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    fn service(&self) -> ProductService<R> {
        ProductService::new(self.repo.clone())
    }
}

fn to_responses(products: Vec<Product>) -> Json<Vec<ProductResponse>> {
    Json(products.into_iter().map(ProductResponse::from).collect())
}

/// GET /api/products
pub async fn list_products<R>(
    State(state): State<InventoryAppState<R>>,
) -> InventoryResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let products = state.service().list().await?;
    tracing::info!(count = products.len(), "Listed products");
    Ok(to_responses(products))
}

/// GET /api/products/{id}
pub async fn get_product<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> InventoryResult<Json<ProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let product = state.service().get(ProductId::new(id)).await?;
    Ok(Json(product.into()))
}

/// POST /api/products
pub async fn create_product<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<ProductRequest>, AppError>,
) -> InventoryResult<(StatusCode, Json<ProductResponse>)>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let draft = ProductDraft::try_from(req)?;
    let product = state.service().create(draft, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /api/products/{id}
pub async fn update_product<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<ProductRequest>, AppError>,
) -> InventoryResult<Json<ProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let draft = ProductDraft::try_from(req)?;
    let product = state
        .service()
        .update(ProductId::new(id), draft, Utc::now())
        .await?;
    Ok(Json(product.into()))
}

/// DELETE /api/products/{id}
pub async fn delete_product<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> InventoryResult<Json<MessageResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    state.service().delete(ProductId::new(id)).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// GET /api/products/search?name=
pub async fn search_products<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, AppError>,
) -> InventoryResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let products = state.service().search_by_name(&query.name).await?;
    tracing::info!(name = %query.name, count = products.len(), "Searched products");
    Ok(to_responses(products))
}

/// GET /api/products/color/{color}
pub async fn products_by_color<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(Path(color), _): WithRejection<Path<String>, AppError>,
) -> InventoryResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let products = state.service().filter_by_color(&color).await?;
    tracing::info!(color = %color, count = products.len(), "Filtered products by color");
    Ok(to_responses(products))
}

/// GET /api/products/size/{size}
pub async fn products_by_size<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(Path(size), _): WithRejection<Path<String>, AppError>,
) -> InventoryResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let products = state.service().filter_by_size(&size).await?;
    tracing::info!(size = %size, count = products.len(), "Filtered products by size");
    Ok(to_responses(products))
}

/// POST /api/products/images
///
/// Reads the `file` part with a running size check so an oversized upload
/// is rejected before it is fully buffered.
pub async fn upload_image<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(mut multipart, _): WithRejection<Multipart, InventoryError>,
) -> InventoryResult<(StatusCode, Json<ImageUploadResponse>)>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let max_bytes = state.images.max_bytes();

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_filename = field.file_name().unwrap_or_default().to_string();
        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if data.len() + chunk.len() > max_bytes {
                return Err(StorageError::TooLarge { max: max_bytes }.into());
            }
            data.extend_from_slice(&chunk);
        }

        let filename = state
            .images
            .store(&original_filename, &data, Utc::now())
            .await?;
        tracing::info!(filename = %filename, size = data.len(), "Image uploaded");

        return Ok((StatusCode::CREATED, Json(ImageUploadResponse::new(filename))));
    }

    Err(InventoryError::Validation("file: File is required".to_string()))
}

/// DELETE /api/products/images/{filename}
pub async fn delete_image<R>(
    State(state): State<InventoryAppState<R>>,
    WithRejection(Path(filename), _): WithRejection<Path<String>, AppError>,
) -> InventoryResult<Json<MessageResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let removed = state.images.delete(&filename).await?;
    tracing::info!(filename = %filename, removed, "Image delete requested");
    Ok(Json(MessageResponse::new("Image deleted successfully")))
}
