use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use super::PhotoStorage;
use crate::error::AppError;

const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// Photo bytes that passed decoding and the size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPhoto(Vec<u8>);

impl DecodedPhoto {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    pub key: String,
    pub url: String,
}

/// Decodes client photo uploads and hands them to the configured storage.
#[derive(Clone)]
pub struct PhotoUploader {
    storage: Arc<dyn PhotoStorage>,
    max_bytes: usize,
}

impl PhotoUploader {
    pub fn new(storage: Arc<dyn PhotoStorage>, max_bytes: usize) -> Self {
        Self { storage, max_bytes }
    }

    /// Validation only; nothing is stored.
    pub fn decode(&self, encoded: &str) -> Result<DecodedPhoto, AppError> {
        decode_photo(encoded, self.max_bytes).map(DecodedPhoto)
    }

    pub async fn store_client_photo(
        &self,
        user_id: Uuid,
        photo: &DecodedPhoto,
    ) -> Result<StoredPhoto, AppError> {
        let key = client_photo_key(user_id, chrono::Utc::now().timestamp_millis());
        let url = self
            .storage
            .put(&key, photo.as_bytes(), PHOTO_CONTENT_TYPE)
            .await
            .map_err(|err| AppError::internal_with_source("Photo upload failed", err))?;
        Ok(StoredPhoto { key, url })
    }

    /// Removes a photo whose database write failed. Failures are logged, not returned.
    pub async fn discard(&self, photo: &StoredPhoto) {
        if let Err(err) = self.storage.delete(&photo.key).await {
            tracing::warn!(key = %photo.key, error = %err, "failed to remove orphaned photo");
        }
    }
}

/// Accepts plain base64 or a `data:<mime>;base64,` URL.
pub fn decode_photo(encoded: &str, max_bytes: usize) -> Result<Vec<u8>, AppError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| AppError::validation("photo", "photo must be valid base64"))?;
    if bytes.is_empty() {
        return Err(AppError::validation("photo", "photo must not be empty"));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::validation(
            "photo",
            format!("photo must be at most {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

pub fn client_photo_key(user_id: Uuid, unix_millis: i64) -> String {
    format!("clients/client-{user_id}-{unix_millis}.jpg")
}
