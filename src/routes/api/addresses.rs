use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::UserRole,
    error::AppError,
    middleware::AuthRoleGuard,
    response::{ApiResult, JsonApiResponse},
    services::{
        ServiceContext,
        address_service::{AddressUpdate, NewAddress},
    },
    state::AppState,
    validation::{
        Cep,
        fields::{optional_text, state_code, text},
    },
};

use super::dto::AddressView;

const STREET: (usize, usize) = (3, 255);
const NUMBER: (usize, usize) = (1, 20);
const NEIGHBORHOOD: (usize, usize) = (3, 100);
const CITY: (usize, usize) = (3, 100);
const COMPLEMENT_MAX: usize = 255;

fn street(value: &str) -> Result<String, AppError> {
    text("street", value, STREET.0, STREET.1)
}

fn number(value: &str) -> Result<String, AppError> {
    text("number", value, NUMBER.0, NUMBER.1)
}

fn neighborhood(value: &str) -> Result<String, AppError> {
    text("neighborhood", value, NEIGHBORHOOD.0, NEIGHBORHOOD.1)
}

fn city(value: &str) -> Result<String, AppError> {
    text("city", value, CITY.0, CITY.1)
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateAddressRequest {
    pub cep: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub complement: Option<String>,
    pub is_default: bool,
}

impl TryFrom<CreateAddressRequest> for NewAddress {
    type Error = AppError;

    fn try_from(body: CreateAddressRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            cep: Cep::parse(&body.cep)?,
            street: street(&body.street)?,
            number: number(&body.number)?,
            neighborhood: neighborhood(&body.neighborhood)?,
            city: city(&body.city)?,
            state: state_code(&body.state)?,
            complement: optional_text("complement", body.complement.as_deref(), COMPLEMENT_MAX)?,
            is_default: body.is_default,
        })
    }
}

/// Absent fields are left alone; an empty `complement` clears it.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UpdateAddressRequest {
    pub cep: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub complement: Option<String>,
    pub is_default: Option<bool>,
}

impl TryFrom<UpdateAddressRequest> for AddressUpdate {
    type Error = AppError;

    fn try_from(body: UpdateAddressRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            cep: body.cep.as_deref().map(Cep::parse).transpose()?,
            street: body.street.as_deref().map(street).transpose()?,
            number: body.number.as_deref().map(number).transpose()?,
            neighborhood: body.neighborhood.as_deref().map(neighborhood).transpose()?,
            city: body.city.as_deref().map(city).transpose()?,
            state: body.state.as_deref().map(state_code).transpose()?,
            complement: body
                .complement
                .as_deref()
                .map(|complement| optional_text("complement", Some(complement), COMPLEMENT_MAX))
                .transpose()?,
            is_default: body.is_default,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/addresses", get(list_addresses).post(create_address))
        .route(
            "/addresses/{id}",
            patch(update_address).delete(delete_address),
        )
        .with_state(state)
}

async fn list_addresses(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
) -> ApiResult<Vec<AddressView>> {
    let user_id = guard.claims.subject_id()?;
    let addresses = ServiceContext::from_state(&state).address().list(user_id).await?;
    JsonApiResponse::ok(addresses.into_iter().map(AddressView::from).collect())
}

async fn create_address(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
    Json(body): Json<CreateAddressRequest>,
) -> ApiResult<AddressView> {
    let user_id = guard.claims.subject_id()?;
    let input = NewAddress::try_from(body)?;
    let address = ServiceContext::from_state(&state)
        .address()
        .create(user_id, input)
        .await?;
    JsonApiResponse::created(address.into())
}

async fn update_address(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAddressRequest>,
) -> ApiResult<AddressView> {
    let user_id = guard.claims.subject_id()?;
    let update = AddressUpdate::try_from(body)?;
    let address = ServiceContext::from_state(&state)
        .address()
        .update(user_id, id, update)
        .await?;
    JsonApiResponse::ok(address.into())
}

async fn delete_address(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
    Path(id): Path<Uuid>,
) -> ApiResult<serde_json::Value> {
    let user_id = guard.claims.subject_id()?;
    ServiceContext::from_state(&state)
        .address()
        .delete(user_id, id)
        .await?;
    JsonApiResponse::ok(serde_json::json!({ "id": id, "deleted": true }))
}

#[cfg(test)]
mod tests {
    use super::{CreateAddressRequest, UpdateAddressRequest};
    use crate::error::AppError;
    use crate::services::address_service::{AddressUpdate, NewAddress};

    fn body() -> CreateAddressRequest {
        CreateAddressRequest {
            cep: "01310-100".to_string(),
            street: "Avenida Paulista".to_string(),
            number: "1000".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "sp".to_string(),
            complement: Some("".to_string()),
            is_default: true,
        }
    }

    #[test]
    fn create_request_normalizes_fields() {
        let input = NewAddress::try_from(body()).expect("valid address");
        assert_eq!(input.cep.as_str(), "01310100");
        assert_eq!(input.state, "SP");
        assert_eq!(input.complement, None);
        assert!(input.is_default);
    }

    #[test]
    fn short_street_names_the_field() {
        let request = CreateAddressRequest {
            street: "Av".to_string(),
            ..body()
        };
        let err = NewAddress::try_from(request).err().expect("street should fail");
        assert!(matches!(err, AppError::Validation { field: "street", .. }));
    }

    #[test]
    fn bad_cep_names_the_field() {
        let request = CreateAddressRequest {
            cep: "123".to_string(),
            ..body()
        };
        let err = NewAddress::try_from(request).err().expect("cep should fail");
        assert!(matches!(err, AppError::Validation { field: "cep", .. }));
    }

    #[test]
    fn empty_complement_in_patch_clears_it() {
        let update = AddressUpdate::try_from(UpdateAddressRequest {
            complement: Some(" ".to_string()),
            ..Default::default()
        })
        .expect("valid patch");
        assert_eq!(update.complement, Some(None));
        assert!(update.street.is_none());

        let untouched = AddressUpdate::try_from(UpdateAddressRequest::default()).expect("valid");
        assert!(untouched.complement.is_none());
    }
}
