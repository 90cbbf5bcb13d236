use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    auth::jwt::TokenIssuer,
    config::AuthConfig,
    db::entities::{address, admin, client, employee, product, user},
    services::ServiceContext,
    storage::{LocalPhotoStorage, PhotoUploader},
};

pub const TEST_SECRET: &[u8] = b"test-secret";

pub fn ts() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .expect("offset should be valid")
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp should be valid")
}

pub fn test_tokens() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, 3600)
}

pub fn test_upload_dir() -> std::path::PathBuf {
    std::env::temp_dir().join("bike-shop-test-uploads")
}

pub fn test_photos() -> PhotoUploader {
    let storage = LocalPhotoStorage::new(test_upload_dir(), "/uploads");
    PhotoUploader::new(Arc::new(storage), 1024 * 1024)
}

/// Uploader writing under a fresh directory, for tests that inspect what was stored.
pub fn isolated_photos() -> (PhotoUploader, std::path::PathBuf) {
    let dir = test_upload_dir().join(Uuid::new_v4().to_string());
    let storage = LocalPhotoStorage::new(dir.clone(), "/uploads");
    (PhotoUploader::new(Arc::new(storage), 1024 * 1024), dir)
}

pub fn stored_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir.join("clients"))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

pub fn test_services(db: &DatabaseConnection) -> ServiceContext {
    ServiceContext::new(db, test_tokens(), test_photos())
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: String::from_utf8_lossy(TEST_SECRET).into_owned(),
        access_ttl_secs: 3600,
        admin_username: "admin".to_string(),
        admin_password: "adminpassword".to_string(),
        admin_email: "admin@example.com".to_string(),
        admin_name: "Administrator".to_string(),
    }
}

pub fn user_model(id: Uuid, email: &str) -> user::Model {
    user_with_hash(id, email, "hash")
}

pub fn user_with_hash(id: Uuid, email: &str, password_hash: &str) -> user::Model {
    let now = ts();
    user::Model {
        id,
        external_id: format!("local:{id}"),
        name: "Ana Souza".to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        login_method: user::LOGIN_METHOD_PASSWORD.to_string(),
        role: user::ROLE_USER.to_string(),
        last_signed_in_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn client_model(id: Uuid, user_id: Uuid, cpf: &str) -> client::Model {
    let now = ts();
    client::Model {
        id,
        user_id,
        cpf: cpf.to_string(),
        phone: "11987654321".to_string(),
        photo_url: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn employee_model(id: Uuid, user_id: Uuid, cpf: &str) -> employee::Model {
    let now = ts();
    employee::Model {
        id,
        user_id,
        cpf: cpf.to_string(),
        phone: "11987654321".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn address_model(id: Uuid, client_id: Uuid, is_default: bool) -> address::Model {
    let now = ts();
    address::Model {
        id,
        client_id,
        cep: "01310100".to_string(),
        street: "Avenida Paulista".to_string(),
        number: "1000".to_string(),
        neighborhood: "Bela Vista".to_string(),
        city: "Sao Paulo".to_string(),
        state: "SP".to_string(),
        complement: None,
        is_default,
        created_at: now,
        updated_at: now,
    }
}

pub fn product_model(id: Uuid, name: &str, active: bool) -> product::Model {
    let now = ts();
    product::Model {
        id,
        name: name.to_string(),
        description: None,
        price: 159_990,
        category: "bikes".to_string(),
        image_url: None,
        stock: 4,
        active,
        created_at: now,
        updated_at: now,
    }
}

pub fn admin_model(id: Uuid, username: &str, password_hash: &str, active: bool) -> admin::Model {
    let now = ts();
    admin::Model {
        id,
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        email: "admin@example.com".to_string(),
        name: "Administrator".to_string(),
        active,
        created_at: now,
        updated_at: now,
    }
}
