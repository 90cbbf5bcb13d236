use sea_orm::Set;
use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, DaoLayerError, PaginatedResponse, ProductDao, ProductFilter},
    db::entities::product,
    error::AppError,
};

pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub image_url: Option<String>,
    pub stock: i32,
    pub active: bool,
}

/// Nested options distinguish "leave as is" from "clear".
#[derive(Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub image_url: Option<Option<String>>,
    pub stock: Option<i32>,
    pub active: Option<bool>,
}

impl ProductUpdate {
    fn apply(self, active: &mut product::ActiveModel) {
        let ProductUpdate {
            name,
            description,
            price,
            category,
            image_url,
            stock,
            active: is_active,
        } = self;

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(description);
        }
        if let Some(price) = price {
            active.price = Set(price);
        }
        if let Some(category) = category {
            active.category = Set(category);
        }
        if let Some(image_url) = image_url {
            active.image_url = Set(image_url);
        }
        if let Some(stock) = stock {
            active.stock = Set(stock);
        }
        if let Some(is_active) = is_active {
            active.active = Set(is_active);
        }
    }
}

fn product_not_found(err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::NotFound { .. } => AppError::not_found("Product not found"),
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct ProductService {
    products: ProductDao,
}

impl ProductService {
    pub fn new(products: ProductDao) -> Self {
        Self { products }
    }

    pub async fn list_public(
        &self,
        category: Option<String>,
        page: u64,
        page_size: u64,
    ) -> Result<PaginatedResponse<product::Model>, AppError> {
        let filter = ProductFilter {
            active_only: true,
            category,
        };
        Ok(self.products.list(filter, page, page_size).await?)
    }

    /// Inactive products are hidden from the storefront.
    pub async fn get_public(&self, id: Uuid) -> Result<product::Model, AppError> {
        self.products
            .find_active(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    pub async fn list_all(
        &self,
        category: Option<String>,
        page: u64,
        page_size: u64,
    ) -> Result<PaginatedResponse<product::Model>, AppError> {
        let filter = ProductFilter {
            active_only: false,
            category,
        };
        Ok(self.products.list(filter, page, page_size).await?)
    }

    pub async fn create(&self, input: NewProduct) -> Result<product::Model, AppError> {
        let model = product::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            category: Set(input.category),
            image_url: Set(input.image_url),
            stock: Set(input.stock),
            active: Set(input.active),
            ..Default::default()
        };
        let product = self.products.create(model).await?;
        tracing::info!(product_id = %product.id, "created product");
        Ok(product)
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<product::Model, AppError> {
        self.products
            .update(id, move |active| update.apply(active))
            .await
            .map_err(product_not_found)
    }

    /// Soft delete; the row stays for order history.
    pub async fn deactivate(&self, id: Uuid) -> Result<product::Model, AppError> {
        let product = self.products.deactivate(id).await.map_err(product_not_found)?;
        tracing::info!(product_id = %product.id, "deactivated product");
        Ok(product)
    }
}
