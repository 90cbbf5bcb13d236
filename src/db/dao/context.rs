use sea_orm::DatabaseConnection;

use super::{AddressDao, AdminDao, ClientDao, DaoBase, EmployeeDao, ProductDao, UserDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn client(&self) -> ClientDao {
        DaoBase::new(&self.db)
    }

    pub fn employee(&self) -> EmployeeDao {
        DaoBase::new(&self.db)
    }

    pub fn address(&self) -> AddressDao {
        DaoBase::new(&self.db)
    }

    pub fn product(&self) -> ProductDao {
        DaoBase::new(&self.db)
    }

    pub fn admin(&self) -> AdminDao {
        DaoBase::new(&self.db)
    }
}
