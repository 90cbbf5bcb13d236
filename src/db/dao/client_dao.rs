use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{
    DaoBase, DaoLayerError, DaoResult, TimestampedActiveModel, stamp_new, stamp_with_id,
};
use crate::db::entities::{client, prelude::Client, user};

#[derive(Clone)]
pub struct ClientDao {
    db: DatabaseConnection,
}

impl DaoBase for ClientDao {
    type Entity = Client;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ClientDao {
    pub async fn find_by_user(&self, user_id: Uuid) -> DaoResult<Option<client::Model>> {
        self.find_one(move |query| query.filter(client::Column::UserId.eq(user_id)))
            .await
    }

    /// `cpf` must already be cleaned to digits.
    pub async fn find_by_cpf(&self, cpf: &str) -> DaoResult<Option<client::Model>> {
        let cpf = cpf.to_string();
        self.find_one(move |query| query.filter(client::Column::Cpf.eq(cpf)))
            .await
    }

    pub async fn create_client(
        &self,
        user_id: Uuid,
        cpf: &str,
        phone: &str,
        photo_url: Option<String>,
    ) -> DaoResult<client::Model> {
        let model = client::ActiveModel {
            user_id: Set(user_id),
            cpf: Set(cpf.to_string()),
            phone: Set(phone.to_string()),
            photo_url: Set(photo_url),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Inserts the user (under `user_id`) and its client profile atomically; a failure on
    /// either insert rolls both back.
    pub async fn create_with_user(
        &self,
        user_id: Uuid,
        mut user: user::ActiveModel,
        cpf: &str,
        phone: &str,
        photo_url: Option<String>,
    ) -> DaoResult<(user::Model, client::Model)> {
        let txn = self.db.begin().await.map_err(DaoLayerError::Db)?;

        stamp_with_id(&mut user, user_id);
        let user = user.insert(&txn).await.map_err(DaoLayerError::Db)?;

        let mut client = client::ActiveModel {
            user_id: Set(user_id),
            cpf: Set(cpf.to_string()),
            phone: Set(phone.to_string()),
            photo_url: Set(photo_url),
            ..Default::default()
        };
        stamp_new(&mut client);
        let client = client.insert(&txn).await.map_err(DaoLayerError::Db)?;

        txn.commit().await.map_err(DaoLayerError::Db)?;
        Ok((user, client))
    }

    /// Renames the owning user and changes contact fields in one transaction, so a failed
    /// write leaves both rows untouched.
    pub async fn update_profile(
        &self,
        client: client::Model,
        name: Option<String>,
        phone: Option<String>,
        photo_url: Option<String>,
    ) -> DaoResult<(client::Model, user::Model)> {
        let txn = self.db.begin().await.map_err(DaoLayerError::Db)?;
        let now = Utc::now().fixed_offset();

        let owner = user::Entity::find_by_id(client.user_id)
            .one(&txn)
            .await
            .map_err(DaoLayerError::Db)?
            .ok_or_else(|| DaoLayerError::not_found::<user::Entity>(client.user_id))?;
        let owner = match name {
            Some(name) => {
                let mut active = owner.into_active_model();
                active.name = Set(name);
                active.set_updated_at(now);
                active.update(&txn).await.map_err(DaoLayerError::Db)?
            }
            None => owner,
        };

        let client = if phone.is_none() && photo_url.is_none() {
            client
        } else {
            let mut active = client.into_active_model();
            if let Some(phone) = phone {
                active.phone = Set(phone);
            }
            if let Some(photo_url) = photo_url {
                active.photo_url = Set(Some(photo_url));
            }
            active.set_updated_at(now);
            active.update(&txn).await.map_err(DaoLayerError::Db)?
        };

        txn.commit().await.map_err(DaoLayerError::Db)?;
        Ok((client, owner))
    }
}
