use sea_orm::{ColumnTrait, DatabaseConnection, Order, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult, PaginatedResponse};
use crate::db::entities::{prelude::Product, product};

#[derive(Clone)]
pub struct ProductDao {
    db: DatabaseConnection,
}

impl DaoBase for ProductDao {
    type Entity = Product;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub active_only: bool,
    pub category: Option<String>,
}

impl ProductDao {
    /// Ordered by name.
    pub async fn list(
        &self,
        filter: ProductFilter,
        page: u64,
        page_size: u64,
    ) -> DaoResult<PaginatedResponse<product::Model>> {
        self.find(
            page,
            page_size,
            Some((product::Column::Name, Order::Asc)),
            move |mut query| {
                if filter.active_only {
                    query = query.filter(product::Column::Active.eq(true));
                }
                if let Some(category) = filter.category {
                    query = query.filter(product::Column::Category.eq(category));
                }
                query
            },
        )
        .await
    }

    pub async fn find_active(&self, id: Uuid) -> DaoResult<Option<product::Model>> {
        self.find_one(move |query| {
            query
                .filter(product::Column::Id.eq(id))
                .filter(product::Column::Active.eq(true))
        })
        .await
    }

    pub async fn deactivate(&self, id: Uuid) -> DaoResult<product::Model> {
        self.update(id, |active| {
            active.active = Set(false);
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use super::{ProductDao, ProductFilter};
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::db::entities::product;
    use crate::test_helpers::product_model;

    #[tokio::test]
    async fn public_listing_filters_active_and_category() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[product_model(Uuid::new_v4(), "Speed 21", true)]])
            .into_connection();
        let dao = ProductDao::new(&db);

        let page = dao
            .list(
                ProductFilter {
                    active_only: true,
                    category: Some("bikes".to_string()),
                },
                1,
                20,
            )
            .await
            .expect("list should succeed");
        assert_eq!(page.data.len(), 1);
        assert!(!page.has_next);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"\"products\".\"active\" = $1"#));
        assert!(log.contains(r#"\"products\".\"category\" = $2"#));
        assert!(log.contains(r#"ORDER BY \"products\".\"name\" ASC"#));
    }

    #[tokio::test]
    async fn deactivate_keeps_the_row() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[product_model(id, "Speed 21", true)]])
            .append_query_results([[product_model(id, "Speed 21", false)]])
            .into_connection();
        let dao = ProductDao::new(&db);

        let product = dao.deactivate(id).await.expect("deactivate should succeed");
        assert!(!product.active);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("DELETE"));
    }

    #[tokio::test]
    async fn deactivate_missing_product_is_not_found() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();
        let dao = ProductDao::new(&db);

        let err = dao.deactivate(id).await.expect_err("missing product");
        assert!(matches!(err, DaoLayerError::NotFound { id: missing, .. } if missing == id));
    }
}
