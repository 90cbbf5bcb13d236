use std::sync::Arc;

use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::{
    auth::jwt::TokenIssuer,
    config::AppConfig,
    storage::{LocalPhotoStorage, PhotoUploader},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub tokens: TokenIssuer,
    pub photos: PhotoUploader,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DatabaseConnection,
        tokens: TokenIssuer,
        photos: PhotoUploader,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            db,
            tokens,
            photos,
        })
    }

    /// Token keys come from the `auth` section; photos go to local disk below
    /// `storage.upload_dir`.
    pub fn from_config(config: AppConfig, db: DatabaseConnection) -> Result<Arc<Self>> {
        let auth = config
            .auth
            .as_ref()
            .context("auth config is required (set APP_AUTH__JWT_SECRET and the admin seed)")?;
        let tokens = TokenIssuer::new(auth.jwt_secret.as_bytes(), auth.access_ttl_secs);

        let storage = LocalPhotoStorage::new(
            config.storage.upload_dir.clone(),
            config.storage.public_base_url.clone(),
        );
        let photos = PhotoUploader::new(Arc::new(storage), config.storage.max_photo_bytes);

        Ok(Self::new(config, db, tokens, photos))
    }
}
