#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{self, Body},
    http::{Request, Response, header},
};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use bike_shop::{
    auth::{Principal, Role, jwt::TokenIssuer},
    config::AppConfig,
    db::entities::{address, admin, client, product, user},
    routes::router,
    state::AppState,
    storage::{LocalPhotoStorage, PhotoUploader},
};

pub const SECRET: &[u8] = b"integration-secret";

pub fn tokens() -> TokenIssuer {
    TokenIssuer::new(SECRET, 3600)
}

pub fn app(db: DatabaseConnection) -> Router {
    let storage = LocalPhotoStorage::new(
        std::env::temp_dir().join("bike-shop-it-uploads"),
        "/uploads",
    );
    let photos = PhotoUploader::new(Arc::new(storage), 1024 * 1024);
    router(AppState::new(AppConfig::default(), db, tokens(), photos))
}

pub fn user_token(user_id: Uuid) -> String {
    tokens()
        .issue(&user_id, Principal::User, Role::User.grants())
        .expect("token should encode")
        .access_token
}

pub fn admin_token(admin_id: Uuid) -> String {
    tokens()
        .issue(&admin_id, Principal::Admin, vec![Role::Admin])
        .expect("token should encode")
        .access_token
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn send_json(
    method: &str,
    uri: &str,
    token: Option<&str>,
    payload: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(payload.to_string()))
        .expect("request")
}

pub async fn json_body(res: Response<Body>) -> serde_json::Value {
    let bytes = body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

pub fn user_row(id: Uuid, email: &str, password_hash: &str) -> user::Model {
    user::Model {
        id,
        external_id: format!("local:{id}"),
        name: "Ana Souza".to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        login_method: user::LOGIN_METHOD_PASSWORD.to_string(),
        role: user::ROLE_USER.to_string(),
        last_signed_in_at: None,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn client_row(id: Uuid, user_id: Uuid, cpf: &str, phone: &str) -> client::Model {
    client::Model {
        id,
        user_id,
        cpf: cpf.to_string(),
        phone: phone.to_string(),
        photo_url: None,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn product_row(name: &str, category: &str) -> product::Model {
    product::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        price: 129_900,
        category: category.to_string(),
        image_url: None,
        stock: 3,
        active: true,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn admin_row(id: Uuid, username: &str, password_hash: &str, active: bool) -> admin::Model {
    admin::Model {
        id,
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        email: "admin@example.com".to_string(),
        name: "Administrator".to_string(),
        active,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn address_row(client_id: Uuid, is_default: bool) -> address::Model {
    address::Model {
        id: Uuid::new_v4(),
        client_id,
        cep: "01310100".to_string(),
        street: "Avenida Paulista".to_string(),
        number: "1578".to_string(),
        neighborhood: "Bela Vista".to_string(),
        city: "Sao Paulo".to_string(),
        state: "SP".to_string(),
        complement: None,
        is_default,
        created_at: now(),
        updated_at: now(),
    }
}
