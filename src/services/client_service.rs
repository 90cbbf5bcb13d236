use uuid::Uuid;

use crate::{
    db::dao::{ClientDao, UserDao},
    db::entities::{client, user},
    error::AppError,
    storage::{DecodedPhoto, PhotoUploader, StoredPhoto},
    validation::{Cpf, Phone},
};

pub struct NewClient {
    pub cpf: Cpf,
    pub phone: Phone,
    pub photo_base64: Option<String>,
}

/// `None` leaves the field untouched.
#[derive(Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub phone: Option<Phone>,
    pub photo_base64: Option<String>,
}

#[derive(Clone)]
pub struct ClientService {
    clients: ClientDao,
    users: UserDao,
    photos: PhotoUploader,
}

impl ClientService {
    pub fn new(clients: ClientDao, users: UserDao, photos: PhotoUploader) -> Self {
        Self {
            clients,
            users,
            photos,
        }
    }

    fn decode_photo(&self, photo_base64: Option<&str>) -> Result<Option<DecodedPhoto>, AppError> {
        photo_base64.map(|encoded| self.photos.decode(encoded)).transpose()
    }

    async fn store_photo(
        &self,
        user_id: Uuid,
        photo: Option<&DecodedPhoto>,
    ) -> Result<Option<StoredPhoto>, AppError> {
        match photo {
            Some(photo) => Ok(Some(self.photos.store_client_photo(user_id, photo).await?)),
            None => Ok(None),
        }
    }

    async fn discard_photo(&self, stored: Option<&StoredPhoto>) {
        if let Some(stored) = stored {
            self.photos.discard(stored).await;
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: NewClient,
    ) -> Result<client::Model, AppError> {
        let photo = self.decode_photo(input.photo_base64.as_deref())?;
        if self.clients.find_by_user(user_id).await?.is_some() {
            return Err(AppError::conflict("Client profile already exists"));
        }
        if self.clients.find_by_cpf(input.cpf.as_str()).await?.is_some() {
            return Err(AppError::conflict("CPF already registered"));
        }

        let stored = self.store_photo(user_id, photo.as_ref()).await?;
        let created = self
            .clients
            .create_client(
                user_id,
                input.cpf.as_str(),
                input.phone.as_str(),
                stored.as_ref().map(|photo| photo.url.clone()),
            )
            .await;
        let client = match created {
            Ok(client) => client,
            Err(err) => {
                self.discard_photo(stored.as_ref()).await;
                return Err(err.into());
            }
        };
        tracing::info!(%user_id, client_id = %client.id, "created client profile");
        Ok(client)
    }

    pub async fn find_for_user(&self, user_id: Uuid) -> Result<Option<client::Model>, AppError> {
        Ok(self.clients.find_by_user(user_id).await?)
    }

    pub async fn me(&self, user_id: Uuid) -> Result<(client::Model, user::Model), AppError> {
        let client = self
            .find_for_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client profile not found"))?;
        let user = self.owner(user_id).await?;
        Ok((client, user))
    }

    /// Everything is validated before the first write; the rename and the contact change
    /// commit together.
    pub async fn update(
        &self,
        user_id: Uuid,
        update: ClientUpdate,
    ) -> Result<(client::Model, user::Model), AppError> {
        let ClientUpdate {
            name,
            phone,
            photo_base64,
        } = update;
        let photo = self.decode_photo(photo_base64.as_deref())?;

        let existing = self
            .find_for_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client profile not found"))?;

        if name.is_none() && phone.is_none() && photo.is_none() {
            let user = self.owner(user_id).await?;
            return Ok((existing, user));
        }

        let stored = self.store_photo(user_id, photo.as_ref()).await?;
        let updated = self
            .clients
            .update_profile(
                existing,
                name,
                phone.map(Phone::into_inner),
                stored.as_ref().map(|photo| photo.url.clone()),
            )
            .await;
        match updated {
            Ok(updated) => Ok(updated),
            Err(err) => {
                self.discard_photo(stored.as_ref()).await;
                Err(err.into())
            }
        }
    }

    async fn owner(&self, user_id: Uuid) -> Result<user::Model, AppError> {
        self.users
            .find_optional(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
