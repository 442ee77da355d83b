//! Domain Entities
//!
//! Core business entities for the inventory domain.

use chrono::{DateTime, Utc};
use kernel::id::ProductId;

use crate::domain::value_objects::ProductDraft;

/// Product entity - one textile article in stock
///
/// `id` and `created_at` are fixed when the row is inserted; every update
/// replaces the mutable fields and refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub size: String,
    /// Opaque image reference (stored filename or URL)
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a freshly inserted product
    pub fn from_draft(id: ProductId, draft: &ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name().to_string(),
            description: draft.description().map(str::to_string),
            color: draft.color().to_string(),
            size: draft.size().to_string(),
            image: draft.image().map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields
    pub fn apply(&mut self, draft: &ProductDraft, now: DateTime<Utc>) {
        self.name = draft.name().to_string();
        self.description = draft.description().map(str::to_string);
        self.color = draft.color().to_string();
        self.size = draft.size().to_string();
        self.image = draft.image().map(str::to_string);
        self.updated_at = now;
    }
}
