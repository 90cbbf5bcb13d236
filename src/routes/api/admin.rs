use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::AdminGuard,
    response::{ApiResult, JsonApiResponse},
    services::{
        ServiceContext,
        product_service::{NewProduct, ProductUpdate},
    },
    state::AppState,
};

use super::{
    dto::{AdminSessionResponse, AdminView, Page, ProductQuery, ProductView},
    products::{CreateProductRequest, UpdateProductRequest},
};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/me", get(me))
        .route("/admin/products", get(list_products).post(create_product))
        .route(
            "/admin/products/{id}",
            patch(update_product).delete(deactivate_product),
        )
        .with_state(state)
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AdminLoginRequest>,
) -> ApiResult<AdminSessionResponse> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::invalid_credentials());
    }
    let (token, admin) = ServiceContext::from_state(&state)
        .auth()
        .admin_login(&body.username, &body.password)
        .await?;
    tracing::info!(admin_id = %admin.id, "admin signed in");
    JsonApiResponse::ok(AdminSessionResponse {
        token: token.into(),
        admin: admin.into(),
    })
}

async fn me(guard: AdminGuard) -> ApiResult<AdminView> {
    JsonApiResponse::ok(guard.actor.into())
}

async fn list_products(
    State(state): State<Arc<AppState>>,
    _guard: AdminGuard,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Page<ProductView>> {
    let paging = query.paging();
    let page = ServiceContext::from_state(&state)
        .product()
        .list_all(query.category(), paging.page(), paging.page_size())
        .await?;
    JsonApiResponse::ok(Page::from_paginated(page, ProductView::from))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    _guard: AdminGuard,
    Json(body): Json<CreateProductRequest>,
) -> ApiResult<ProductView> {
    let input = NewProduct::try_from(body)?;
    let product = ServiceContext::from_state(&state)
        .product()
        .create(input)
        .await?;
    JsonApiResponse::created(product.into())
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    _guard: AdminGuard,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProductRequest>,
) -> ApiResult<ProductView> {
    let update = ProductUpdate::try_from(body)?;
    let product = ServiceContext::from_state(&state)
        .product()
        .update(id, update)
        .await?;
    JsonApiResponse::ok(product.into())
}

async fn deactivate_product(
    State(state): State<Arc<AppState>>,
    guard: AdminGuard,
    Path(id): Path<Uuid>,
) -> ApiResult<ProductView> {
    let product = ServiceContext::from_state(&state)
        .product()
        .deactivate(id)
        .await?;
    tracing::info!(by = guard.actor.name(), product_id = %product.id, "product deactivated");
    JsonApiResponse::ok(product.into())
}
