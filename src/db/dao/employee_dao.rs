use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult, PaginatedResponse};
use crate::db::entities::{employee, prelude::Employee};

#[derive(Clone)]
pub struct EmployeeDao {
    db: DatabaseConnection,
}

impl DaoBase for EmployeeDao {
    type Entity = Employee;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl EmployeeDao {
    pub async fn find_by_user(&self, user_id: Uuid) -> DaoResult<Option<employee::Model>> {
        self.find_one(move |query| query.filter(employee::Column::UserId.eq(user_id)))
            .await
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> DaoResult<Option<employee::Model>> {
        let cpf = cpf.to_string();
        self.find_one(move |query| query.filter(employee::Column::Cpf.eq(cpf)))
            .await
    }

    pub async fn create_employee(
        &self,
        user_id: Uuid,
        cpf: &str,
        phone: &str,
    ) -> DaoResult<employee::Model> {
        let model = employee::ActiveModel {
            user_id: Set(user_id),
            cpf: Set(cpf.to_string()),
            phone: Set(phone.to_string()),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn list(
        &self,
        page: u64,
        page_size: u64,
    ) -> DaoResult<PaginatedResponse<employee::Model>> {
        self.find(page, page_size, None, |query| query).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use super::EmployeeDao;
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::test_helpers::employee_model;

    #[tokio::test]
    async fn list_reports_next_page() {
        let rows: Vec<_> = (0..3)
            .map(|_| employee_model(Uuid::new_v4(), Uuid::new_v4(), "11144477735"))
            .collect();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection();
        let dao = EmployeeDao::new(&db);

        let page = dao.list(1, 2).await.expect("list should succeed");
        assert_eq!(page.data.len(), 2);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn list_rejects_oversized_pages() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let dao = EmployeeDao::new(&db);

        let err = dao.list(1, 500).await.expect_err("page size should be rejected");
        assert!(matches!(
            err,
            DaoLayerError::InvalidPagination {
                page: 1,
                page_size: 500
            }
        ));
    }
}
