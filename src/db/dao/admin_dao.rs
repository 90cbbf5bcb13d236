use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::{admin, prelude::Admin};

#[derive(Clone)]
pub struct AdminDao {
    db: DatabaseConnection,
}

impl DaoBase for AdminDao {
    type Entity = Admin;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl AdminDao {
    pub async fn find_by_username(&self, username: &str) -> DaoResult<Option<admin::Model>> {
        let username = username.to_string();
        self.find_one(move |query| query.filter(admin::Column::Username.eq(username)))
            .await
    }

    pub async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
        name: &str,
    ) -> DaoResult<admin::Model> {
        let model = admin::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            email: Set(email.to_string()),
            name: Set(name.to_string()),
            active: Set(true),
            ..Default::default()
        };
        self.create(model).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use super::AdminDao;
    use crate::db::dao::DaoBase;
    use crate::db::entities::admin;
    use crate::test_helpers::admin_model;

    #[tokio::test]
    async fn find_by_username_matches_exactly() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[admin_model(id, "admin", "hash", true)]])
            .append_query_results([Vec::<admin::Model>::new()])
            .into_connection();
        let dao = AdminDao::new(&db);

        let found = dao.find_by_username("admin").await.expect("query should succeed");
        assert_eq!(found.map(|admin| admin.id), Some(id));

        let missing = dao.find_by_username("root").await.expect("query should succeed");
        assert!(missing.is_none());
    }
}
