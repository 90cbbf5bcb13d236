use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    services::{
        ServiceContext,
        product_service::{NewProduct, ProductUpdate},
    },
    state::AppState,
    validation::fields::{non_negative, optional_text, text},
};

use super::dto::{Page, ProductQuery, ProductView};

const NAME_MAX: usize = 255;
const CATEGORY_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 10_000;
const IMAGE_URL_MAX: usize = 2048;

fn name(value: &str) -> Result<String, AppError> {
    text("name", value, 1, NAME_MAX)
}

fn category(value: &str) -> Result<String, AppError> {
    text("category", value, 1, CATEGORY_MAX)
}

fn stock(value: i64) -> Result<i32, AppError> {
    let value = non_negative("stock", value)?;
    i32::try_from(value).map_err(|_| AppError::validation("stock", "stock is too large"))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub image_url: Option<String>,
    pub stock: i64,
    pub active: Option<bool>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = AppError;

    fn try_from(body: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: name(&body.name)?,
            description: optional_text("description", body.description.as_deref(), DESCRIPTION_MAX)?,
            price: non_negative("price", body.price)?,
            category: category(&body.category)?,
            image_url: optional_text("image_url", body.image_url.as_deref(), IMAGE_URL_MAX)?,
            stock: stock(body.stock)?,
            active: body.active.unwrap_or(true),
        })
    }
}

/// Absent fields are left alone; empty `description`/`image_url` clear them.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<i64>,
    pub active: Option<bool>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = AppError;

    fn try_from(body: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: body.name.as_deref().map(name).transpose()?,
            description: body
                .description
                .as_deref()
                .map(|value| optional_text("description", Some(value), DESCRIPTION_MAX))
                .transpose()?,
            price: body
                .price
                .map(|price| non_negative("price", price))
                .transpose()?,
            category: body.category.as_deref().map(category).transpose()?,
            image_url: body
                .image_url
                .as_deref()
                .map(|value| optional_text("image_url", Some(value), IMAGE_URL_MAX))
                .transpose()?,
            stock: body.stock.map(stock).transpose()?,
            active: body.active,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .with_state(state)
}

async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Page<ProductView>> {
    let paging = query.paging();
    let page = ServiceContext::from_state(&state)
        .product()
        .list_public(query.category(), paging.page(), paging.page_size())
        .await?;
    JsonApiResponse::ok(Page::from_paginated(page, ProductView::from))
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<ProductView> {
    let product = ServiceContext::from_state(&state)
        .product()
        .get_public(id)
        .await?;
    JsonApiResponse::ok(product.into())
}

#[cfg(test)]
mod tests {
    use super::{CreateProductRequest, UpdateProductRequest};
    use crate::error::AppError;
    use crate::services::product_service::{NewProduct, ProductUpdate};

    fn body() -> CreateProductRequest {
        CreateProductRequest {
            name: "Speed 21v".to_string(),
            description: Some("Aluminium frame".to_string()),
            price: 189_900,
            category: "bikes".to_string(),
            image_url: None,
            stock: 4,
            active: None,
        }
    }

    #[test]
    fn products_are_active_unless_told_otherwise() {
        let input = NewProduct::try_from(body()).expect("valid product");
        assert!(input.active);
        assert_eq!(input.stock, 4);
    }

    #[test]
    fn negative_price_is_rejected() {
        let request = CreateProductRequest {
            price: -1,
            ..body()
        };
        let err = NewProduct::try_from(request).err().expect("price should fail");
        assert!(matches!(err, AppError::Validation { field: "price", .. }));
    }

    #[test]
    fn stock_beyond_i32_is_rejected() {
        let request = CreateProductRequest {
            stock: i64::from(i32::MAX) + 1,
            ..body()
        };
        let err = NewProduct::try_from(request).err().expect("stock should fail");
        assert!(matches!(err, AppError::Validation { field: "stock", .. }));
    }

    #[test]
    fn patch_can_clear_the_description() {
        let update = ProductUpdate::try_from(UpdateProductRequest {
            description: Some(String::new()),
            ..Default::default()
        })
        .expect("valid patch");
        assert_eq!(update.description, Some(None));
        assert!(update.price.is_none());
    }
}
