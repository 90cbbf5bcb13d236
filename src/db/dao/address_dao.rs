use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult, TimestampedActiveModel, stamp_new};
use crate::db::entities::{address, client, prelude::Address};

#[derive(Clone)]
pub struct AddressDao {
    db: DatabaseConnection,
}

impl DaoBase for AddressDao {
    type Entity = Address;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn marks_default(active: &address::ActiveModel) -> bool {
    matches!(active.is_default, ActiveValue::Set(true))
}

/// Row-locks the owning client so concurrent default changes for it serialize.
async fn lock_client(txn: &DatabaseTransaction, client_id: Uuid) -> DaoResult<client::Model> {
    client::Entity::find_by_id(client_id)
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(DaoLayerError::Db)?
        .ok_or_else(|| DaoLayerError::not_found::<client::Entity>(client_id))
}

async fn clear_other_defaults(
    txn: &DatabaseTransaction,
    client_id: Uuid,
    keep: Uuid,
) -> DaoResult<u64> {
    let result = address::Entity::update_many()
        .col_expr(address::Column::IsDefault, Expr::value(false))
        .filter(address::Column::ClientId.eq(client_id))
        .filter(address::Column::Id.ne(keep))
        .filter(address::Column::IsDefault.eq(true))
        .exec(txn)
        .await
        .map_err(DaoLayerError::Db)?;
    Ok(result.rows_affected)
}

impl AddressDao {
    /// Default address first, then oldest first.
    pub async fn list_by_client(&self, client_id: Uuid) -> DaoResult<Vec<address::Model>> {
        address::Entity::find()
            .filter(address::Column::ClientId.eq(client_id))
            .order_by_desc(address::Column::IsDefault)
            .order_by_asc(address::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn find_owned(
        &self,
        client_id: Uuid,
        id: Uuid,
    ) -> DaoResult<Option<address::Model>> {
        self.find_one(move |query| {
            query
                .filter(address::Column::Id.eq(id))
                .filter(address::Column::ClientId.eq(client_id))
        })
        .await
    }

    /// Inserts `active` for `client_id`. A default address clears the flag on the client's
    /// other addresses inside the same transaction.
    pub async fn create_for_client(
        &self,
        client_id: Uuid,
        mut active: address::ActiveModel,
    ) -> DaoResult<address::Model> {
        active.client_id = ActiveValue::Set(client_id);
        if !marks_default(&active) {
            return self.create(active).await;
        }

        let txn = self.db.begin().await.map_err(DaoLayerError::Db)?;
        lock_client(&txn, client_id).await?;
        let id = stamp_new(&mut active);
        let cleared = clear_other_defaults(&txn, client_id, id).await?;
        let model = active.insert(&txn).await.map_err(DaoLayerError::Db)?;
        txn.commit().await.map_err(DaoLayerError::Db)?;

        tracing::debug!(%client_id, address_id = %id, cleared, "default address replaced");
        Ok(model)
    }

    /// Applies `apply` to the address `id` owned by `client_id`; `Ok(None)` when the client
    /// owns no such address.
    pub async fn update_owned<F>(
        &self,
        client_id: Uuid,
        id: Uuid,
        apply: F,
    ) -> DaoResult<Option<address::Model>>
    where
        F: FnOnce(&mut address::ActiveModel) + Send,
    {
        let txn = self.db.begin().await.map_err(DaoLayerError::Db)?;
        lock_client(&txn, client_id).await?;

        let Some(model) = address::Entity::find_by_id(id)
            .filter(address::Column::ClientId.eq(client_id))
            .one(&txn)
            .await
            .map_err(DaoLayerError::Db)?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());
        if marks_default(&active) {
            clear_other_defaults(&txn, client_id, id).await?;
        }
        let model = active.update(&txn).await.map_err(DaoLayerError::Db)?;
        txn.commit().await.map_err(DaoLayerError::Db)?;
        Ok(Some(model))
    }

    /// `false` when the client owns no such address.
    pub async fn delete_owned(&self, client_id: Uuid, id: Uuid) -> DaoResult<bool> {
        let result = address::Entity::delete_many()
            .filter(address::Column::Id.eq(id))
            .filter(address::Column::ClientId.eq(client_id))
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected > 0)
    }
}
