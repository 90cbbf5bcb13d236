use anyhow::Context;
use uuid::Uuid;

use crate::{
    auth::{
        Principal, Role, TokenBundle,
        jwt::TokenIssuer,
        password::{hash_password, verify_missing_account, verify_password},
    },
    config::AuthConfig,
    db::dao::{AdminDao, ClientDao, DaoContext, UserDao, user_dao::new_password_user},
    db::entities::{admin, client, user},
    error::AppError,
    storage::{PhotoUploader, StoredPhoto},
    validation::{Cpf, Email, Phone},
};

pub struct RegisterInput {
    pub name: String,
    pub email: Email,
    pub password: String,
}

/// Account plus client profile in one step.
pub struct SignupInput {
    pub name: String,
    pub email: Email,
    pub password: String,
    pub cpf: Cpf,
    pub phone: Phone,
    pub photo_base64: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserDao,
    clients: ClientDao,
    admins: AdminDao,
    tokens: TokenIssuer,
    photos: PhotoUploader,
}

impl AuthService {
    pub fn new(daos: &DaoContext, tokens: TokenIssuer, photos: PhotoUploader) -> Self {
        Self {
            users: daos.user(),
            clients: daos.client(),
            admins: daos.admin(),
            tokens,
            photos,
        }
    }

    fn issue_for_user(&self, user: &user::Model) -> Result<TokenBundle, AppError> {
        let role = Role::try_from(user.role.as_str()).unwrap_or(Role::User);
        self.tokens.issue(&user.id, Principal::User, role.grants())
    }

    async fn ensure_email_free(&self, email: &Email) -> Result<(), AppError> {
        if self.users.find_by_email(email.as_str()).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }
        Ok(())
    }

    pub async fn register(
        &self,
        input: RegisterInput,
    ) -> Result<(TokenBundle, user::Model), AppError> {
        self.ensure_email_free(&input.email).await?;

        let password_hash = hash_password(&input.password)?;
        let user = self
            .users
            .create_user(
                &input.name,
                input.email.as_str(),
                &password_hash,
                Role::User.as_str(),
            )
            .await?;
        tracing::info!(user_id = %user.id, "registered user");

        Ok((self.issue_for_user(&user)?, user))
    }

    pub async fn signup(
        &self,
        input: SignupInput,
    ) -> Result<(TokenBundle, user::Model, client::Model), AppError> {
        let photo = input
            .photo_base64
            .as_deref()
            .map(|encoded| self.photos.decode(encoded))
            .transpose()?;
        self.ensure_email_free(&input.email).await?;
        if self.clients.find_by_cpf(input.cpf.as_str()).await?.is_some() {
            return Err(AppError::conflict("CPF already registered"));
        }

        let password_hash = hash_password(&input.password)?;
        let user_id = Uuid::new_v4();
        let stored: Option<StoredPhoto> = match photo.as_ref() {
            Some(photo) => Some(self.photos.store_client_photo(user_id, photo).await?),
            None => None,
        };

        let created = self
            .clients
            .create_with_user(
                user_id,
                new_password_user(
                    &input.name,
                    input.email.as_str(),
                    &password_hash,
                    Role::User.as_str(),
                ),
                input.cpf.as_str(),
                input.phone.as_str(),
                stored.as_ref().map(|photo| photo.url.clone()),
            )
            .await;
        let (user, client) = match created {
            Ok(created) => created,
            Err(err) => {
                if let Some(stored) = stored.as_ref() {
                    self.photos.discard(stored).await;
                }
                return Err(err.into());
            }
        };
        tracing::info!(user_id = %user.id, client_id = %client.id, "signed up client");

        Ok((self.issue_for_user(&user)?, user, client))
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(TokenBundle, user::Model), AppError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.find_by_email(&email).await? else {
            verify_missing_account(password);
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::invalid_credentials());
        }

        let now = chrono::Utc::now().fixed_offset();
        self.users.set_last_signed_in(&user.id, &now).await?;

        Ok((self.issue_for_user(&user)?, user))
    }

    /// Inactive admins get `Forbidden`, but only after the password checked out.
    pub async fn admin_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(TokenBundle, admin::Model), AppError> {
        let Some(admin) = self.admins.find_by_username(username.trim()).await? else {
            verify_missing_account(password);
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(password, &admin.password_hash) {
            return Err(AppError::invalid_credentials());
        }
        if !admin.active {
            return Err(AppError::forbidden("Access denied"));
        }

        let token = self
            .tokens
            .issue(&admin.id, Principal::Admin, vec![Role::Admin])?;
        Ok((token, admin))
    }

    pub async fn seed_admin(&self, cfg: &AuthConfig) -> anyhow::Result<()> {
        if let Some(existing) = self
            .admins
            .find_by_username(&cfg.admin_username)
            .await
            .context("admin lookup failed")?
        {
            tracing::info!("admin already present: {}", existing.username);
            return Ok(());
        }

        let hash = hash_password(&cfg.admin_password)
            .map_err(|err| anyhow::anyhow!("admin seed hash error: {err}"))?;
        let admin = self
            .admins
            .create_admin(&cfg.admin_username, &hash, &cfg.admin_email, &cfg.admin_name)
            .await
            .context("admin seed insert failed")?;
        tracing::info!("seeded admin {}", admin.username);
        Ok(())
    }
}
