//! Domain Value Objects

use crate::error::InventoryError;

/// Validated product fields, as supplied on create and update
///
/// `name`, `color` and `size` are never blank. Values are kept exactly as
/// given; blank-ness is judged on the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    description: Option<String>,
    color: String,
    size: String,
    image: Option<String>,
}

impl ProductDraft {
    /// Validate every required field, reporting all failures at once as
    /// `field: message` joined by `", "`.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        color: impl Into<String>,
        size: impl Into<String>,
        image: Option<String>,
    ) -> Result<Self, InventoryError> {
        let name = name.into();
        let color = color.into();
        let size = size.into();

        let errors: Vec<&str> = [
            (&name, "name: Name is required"),
            (&color, "color: Color is required"),
            (&size, "size: Size is required"),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, message)| message)
        .collect();

        if !errors.is_empty() {
            return Err(InventoryError::Validation(errors.join(", ")));
        }

        Ok(Self {
            name,
            description,
            color,
            size,
            image,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
