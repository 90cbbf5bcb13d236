use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::{
    prelude::User,
    user::{self, LOGIN_METHOD_PASSWORD},
};

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

impl DaoBase for UserDao {
    type Entity = User;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Unsaved password-account user; ids and timestamps are filled in on insert.
pub fn new_password_user(
    name: &str,
    email: &str,
    password_hash: &str,
    role: &str,
) -> user::ActiveModel {
    user::ActiveModel {
        external_id: Set(format!("local:{}", Uuid::new_v4())),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        login_method: Set(LOGIN_METHOD_PASSWORD.to_string()),
        role: Set(role.to_string()),
        last_signed_in_at: Set(None),
        ..Default::default()
    }
}

impl UserDao {
    pub async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        let email = email.to_string();
        self.find_one(move |query| query.filter(user::Column::Email.eq(email)))
            .await
    }

    pub async fn find_optional(&self, id: Uuid) -> DaoResult<Option<user::Model>> {
        self.find_one(move |query| query.filter(user::Column::Id.eq(id)))
            .await
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> DaoResult<user::Model> {
        self.create(new_password_user(name, email, password_hash, role)).await
    }

    pub async fn set_last_signed_in(
        &self,
        id: &Uuid,
        at: &chrono::DateTime<chrono::FixedOffset>,
    ) -> DaoResult<()> {
        let at = *at;
        self.update(*id, move |active| {
            active.last_signed_in_at = Set(Some(at));
        })
        .await
        .map(|_| ())
    }
}
