use sea_orm::Set;
use uuid::Uuid;

use crate::{
    db::dao::{AddressDao, ClientDao},
    db::entities::{address, client},
    error::AppError,
    validation::Cep,
};

pub struct NewAddress {
    pub cep: Cep,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub complement: Option<String>,
    pub is_default: bool,
}

/// `complement: Some(None)` clears the complement.
#[derive(Default)]
pub struct AddressUpdate {
    pub cep: Option<Cep>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub complement: Option<Option<String>>,
    pub is_default: Option<bool>,
}

impl AddressUpdate {
    fn apply(self, active: &mut address::ActiveModel) {
        let AddressUpdate {
            cep,
            street,
            number,
            neighborhood,
            city,
            state,
            complement,
            is_default,
        } = self;

        if let Some(cep) = cep {
            active.cep = Set(cep.into_inner());
        }
        if let Some(street) = street {
            active.street = Set(street);
        }
        if let Some(number) = number {
            active.number = Set(number);
        }
        if let Some(neighborhood) = neighborhood {
            active.neighborhood = Set(neighborhood);
        }
        if let Some(city) = city {
            active.city = Set(city);
        }
        if let Some(state) = state {
            active.state = Set(state);
        }
        if let Some(complement) = complement {
            active.complement = Set(complement);
        }
        if let Some(is_default) = is_default {
            active.is_default = Set(is_default);
        }
    }
}

#[derive(Clone)]
pub struct AddressService {
    addresses: AddressDao,
    clients: ClientDao,
}

impl AddressService {
    pub fn new(addresses: AddressDao, clients: ClientDao) -> Self {
        Self { addresses, clients }
    }

    async fn client_of(&self, user_id: Uuid) -> Result<client::Model, AppError> {
        self.clients
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client profile not found"))
    }

    /// Empty when the user has no client profile yet.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<address::Model>, AppError> {
        match self.clients.find_by_user(user_id).await? {
            Some(client) => Ok(self.addresses.list_by_client(client.id).await?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: NewAddress,
    ) -> Result<address::Model, AppError> {
        let client = self.client_of(user_id).await?;
        let active = address::ActiveModel {
            cep: Set(input.cep.into_inner()),
            street: Set(input.street),
            number: Set(input.number),
            neighborhood: Set(input.neighborhood),
            city: Set(input.city),
            state: Set(input.state),
            complement: Set(input.complement),
            is_default: Set(input.is_default),
            ..Default::default()
        };
        Ok(self.addresses.create_for_client(client.id, active).await?)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        address_id: Uuid,
        update: AddressUpdate,
    ) -> Result<address::Model, AppError> {
        let client = self.client_of(user_id).await?;
        self.addresses
            .update_owned(client.id, address_id, move |active| update.apply(active))
            .await?
            .ok_or_else(|| AppError::not_found("Address not found"))
    }

    pub async fn delete(&self, user_id: Uuid, address_id: Uuid) -> Result<(), AppError> {
        let client = self.client_of(user_id).await?;
        if !self.addresses.delete_owned(client.id, address_id).await? {
            return Err(AppError::not_found("Address not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveValue, DatabaseBackend, IntoActiveModel, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use super::AddressUpdate;
    use crate::db::entities::{address, client};
    use crate::error::AppError;
    use crate::test_helpers::{address_model, client_model, test_services};
    use crate::validation::Cep;

    #[tokio::test]
    async fn list_without_client_is_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<client::Model>::new()])
            .into_connection();
        let service = test_services(&db).address();

        let addresses = service.list(Uuid::new_v4()).await.expect("list should succeed");
        assert!(addresses.is_empty());
    }

    #[tokio::test]
    async fn deleting_someone_elses_address_is_not_found() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[client_model(Uuid::new_v4(), user_id, "11144477735")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = test_services(&db).address();

        let err = service
            .delete(user_id, Uuid::new_v4())
            .await
            .expect_err("foreign address should not be deletable");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_for_foreign_address_is_not_found() {
        let user_id = Uuid::new_v4();
        let client = client_model(Uuid::new_v4(), user_id, "11144477735");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[client.clone()]])
            .append_query_results([[client]])
            .append_query_results([Vec::<address::Model>::new()])
            .into_connection();
        let service = test_services(&db).address();

        let err = service
            .update(user_id, Uuid::new_v4(), AddressUpdate::default())
            .await
            .expect_err("foreign address should not be updatable");
        assert_eq!(err.message(), "Address not found");
    }

    #[test]
    fn update_only_sets_provided_fields() {
        let mut active = address_model(Uuid::new_v4(), Uuid::new_v4(), false).into_active_model();
        AddressUpdate {
            cep: Some(Cep::parse("20040-002").expect("cep")),
            complement: Some(None),
            ..Default::default()
        }
        .apply(&mut active);

        assert!(matches!(active.cep, ActiveValue::Set(ref cep) if cep == "20040002"));
        assert!(matches!(active.complement, ActiveValue::Set(None)));
        assert!(matches!(active.street, ActiveValue::Unchanged(_)));
        assert!(matches!(active.is_default, ActiveValue::Unchanged(false)));
    }
}
