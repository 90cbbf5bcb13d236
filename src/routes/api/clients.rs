use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    auth::UserRole,
    error::AppError,
    middleware::AuthRoleGuard,
    response::{ApiResult, JsonApiResponse},
    services::{
        ServiceContext,
        client_service::{ClientUpdate, NewClient},
    },
    state::AppState,
    validation::{Cpf, Phone, fields},
};

use super::{auth::NAME_MAX, dto::ClientView};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateClientRequest {
    pub cpf: String,
    pub phone: String,
    pub photo_base64: Option<String>,
}

impl TryFrom<CreateClientRequest> for NewClient {
    type Error = AppError;

    fn try_from(body: CreateClientRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            cpf: Cpf::parse(&body.cpf)?,
            phone: Phone::parse(&body.phone)?,
            photo_base64: non_blank(body.photo_base64),
        })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub photo_base64: Option<String>,
}

impl TryFrom<UpdateClientRequest> for ClientUpdate {
    type Error = AppError;

    fn try_from(body: UpdateClientRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: body
                .name
                .map(|name| fields::text("name", &name, 1, NAME_MAX))
                .transpose()?,
            phone: body.phone.as_deref().map(Phone::parse).transpose()?,
            photo_base64: non_blank(body.photo_base64),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/clients", post(create_client))
        .route("/clients/me", get(my_client).patch(update_my_client))
        .with_state(state)
}

async fn create_client(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
    Json(body): Json<CreateClientRequest>,
) -> ApiResult<ClientView> {
    let user_id = guard.claims.subject_id()?;
    let input = NewClient::try_from(body)?;
    let services = ServiceContext::from_state(&state);
    let client = services.client().create(user_id, input).await?;
    let user = services.user().require(&user_id).await?;
    JsonApiResponse::created(ClientView::new(client, &user))
}

async fn my_client(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
) -> ApiResult<ClientView> {
    let user_id = guard.claims.subject_id()?;
    let (client, user) = ServiceContext::from_state(&state).client().me(user_id).await?;
    JsonApiResponse::ok(ClientView::new(client, &user))
}

async fn update_my_client(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
    Json(body): Json<UpdateClientRequest>,
) -> ApiResult<ClientView> {
    let user_id = guard.claims.subject_id()?;
    let update = ClientUpdate::try_from(body)?;
    let (client, user) = ServiceContext::from_state(&state)
        .client()
        .update(user_id, update)
        .await?;
    JsonApiResponse::ok(ClientView::new(client, &user))
}

#[cfg(test)]
mod tests {
    use super::UpdateClientRequest;
    use crate::error::AppError;
    use crate::services::client_service::ClientUpdate;

    #[test]
    fn empty_patch_changes_nothing() {
        let update = ClientUpdate::try_from(UpdateClientRequest::default()).expect("valid");
        assert!(update.name.is_none());
        assert!(update.phone.is_none());
        assert!(update.photo_base64.is_none());
    }

    #[test]
    fn patch_rejects_invalid_phone() {
        let body = UpdateClientRequest {
            phone: Some("119999999".to_string()),
            ..Default::default()
        };
        let err = ClientUpdate::try_from(body).err().expect("phone should fail");
        assert!(matches!(err, AppError::Validation { field: "phone", .. }));
    }
}
