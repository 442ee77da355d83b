//! Local image storage
//!
//! Product images are written to a single flat directory under a generated
//! name `{unix_millis}_{uuid}.{ext}` and served back as static files. Only the
//! generated name ever reaches the filesystem; client-supplied names are used
//! for their extension alone.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted upload: 10 MiB
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Accepted file extensions (compared lowercase)
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File is empty")]
    EmptyFile,

    #[error("File size exceeds maximum limit of {}MB", .max / (1024 * 1024))]
    TooLarge { max: usize },

    #[error("Invalid file type. Allowed types: {}", ALLOWED_EXTENSIONS.join(", "))]
    UnsupportedExtension,

    #[error("Invalid filename")]
    InvalidFilename,

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// `true` when the caller sent something unacceptable
    pub fn is_client_error(&self) -> bool {
        !matches!(self, StorageError::Io(_))
    }
}

/// Flat directory of uploaded images
#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl ImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// Override the size limit (tests)
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate and write an upload, returning the generated filename
    pub async fn store(
        &self,
        original_filename: &str,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::EmptyFile);
        }
        if bytes.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                max: self.max_bytes,
            });
        }

        let extension = allowed_extension(original_filename)?;
        let filename = format!(
            "{}_{}.{}",
            now.timestamp_millis(),
            Uuid::new_v4(),
            extension
        );

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&filename), bytes).await?;

        tracing::debug!(filename = %filename, size = bytes.len(), "Stored image");
        Ok(filename)
    }

    /// Remove a stored image. Missing files are not an error.
    ///
    /// Returns whether a file was actually removed.
    pub async fn delete(&self, filename: &str) -> Result<bool, StorageError> {
        validate_stored_name(filename)?;

        match tokio::fs::remove_file(self.root.join(filename)).await {
            Ok(()) => {
                tracing::debug!(filename = %filename, "Deleted image");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Extension after the last dot, lowercased, if it is on the allow list.
/// A leading dot alone (".png") does not count as an extension.
fn allowed_extension(filename: &str) -> Result<&'static str, StorageError> {
    let extension = match filename.rfind('.') {
        Some(idx) if idx > 0 => filename[idx + 1..].to_ascii_lowercase(),
        _ => return Err(StorageError::UnsupportedExtension),
    };

    ALLOWED_EXTENSIONS
        .iter()
        .copied()
        .find(|allowed| *allowed == extension)
        .ok_or(StorageError::UnsupportedExtension)
}

fn validate_stored_name(filename: &str) -> Result<(), StorageError> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
        || filename.starts_with('.')
    {
        return Err(StorageError::InvalidFilename);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_allowed_extension() {
        assert_eq!(allowed_extension("scarf.PNG").unwrap(), "png");
        assert_eq!(allowed_extension("a.b.jpeg").unwrap(), "jpeg");
        assert!(allowed_extension("notes.txt").is_err());
        assert!(allowed_extension("noext").is_err());
        assert!(allowed_extension(".png").is_err());
    }

    #[test]
    fn test_validate_stored_name() {
        assert!(validate_stored_name("1714564800000_abc.png").is_ok());
        assert!(validate_stored_name("../etc/passwd").is_err());
        assert!(validate_stored_name("a/b.png").is_err());
        assert!(validate_stored_name("a\\b.png").is_err());
        assert!(validate_stored_name(".hidden").is_err());
        assert!(validate_stored_name("").is_err());
    }

    #[tokio::test]
    async fn test_store_writes_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path().join("images"));

        let name = storage
            .store("Silk Scarf.JPG", b"\xff\xd8\xff", fixed_now())
            .await
            .unwrap();

        assert!(name.starts_with(&format!("{}_", fixed_now().timestamp_millis())));
        assert!(name.ends_with(".jpg"));
        let written = tokio::fs::read(storage.root().join(&name)).await.unwrap();
        assert_eq!(written, b"\xff\xd8\xff");
    }

    #[tokio::test]
    async fn test_store_rejects_bad_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path()).with_max_bytes(4);

        assert!(matches!(
            storage.store("a.png", b"", fixed_now()).await,
            Err(StorageError::EmptyFile)
        ));
        assert!(matches!(
            storage.store("a.png", b"12345", fixed_now()).await,
            Err(StorageError::TooLarge { max: 4 })
        ));
        assert!(matches!(
            storage.store("a.exe", b"1", fixed_now()).await,
            Err(StorageError::UnsupportedExtension)
        ));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());
        let name = storage.store("a.gif", b"GIF89a", fixed_now()).await.unwrap();

        assert!(storage.delete(&name).await.unwrap());
        assert!(!storage.delete(&name).await.unwrap());
        assert!(matches!(
            storage.delete("../outside.png").await,
            Err(StorageError::InvalidFilename)
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StorageError::TooLarge { max: MAX_IMAGE_BYTES }.to_string(),
            "File size exceeds maximum limit of 10MB"
        );
        assert_eq!(
            StorageError::UnsupportedExtension.to_string(),
            "Invalid file type. Allowed types: jpg, jpeg, png, gif, webp"
        );
    }
}
