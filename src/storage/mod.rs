mod local;
mod photo;

use std::path::PathBuf;

use async_trait::async_trait;

pub use local::LocalPhotoStorage;
pub use photo::{DecodedPhoto, PhotoUploader, StoredPhoto, client_photo_key, decode_photo};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Blob sink for uploaded client photos.
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Stores `bytes` under `key` and returns the public URL it is served from.
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Removes `key`; a key that is already gone is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
