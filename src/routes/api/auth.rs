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
        auth_service::{RegisterInput, SignupInput},
    },
    state::AppState,
    validation::{Cpf, Email, Phone, fields},
};

use super::dto::{ClientView, SessionResponse, SignupResponse, UserView};

pub const NAME_MAX: usize = 255;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<RegisterRequest> for RegisterInput {
    type Error = AppError;

    fn try_from(body: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: fields::text("name", &body.name, 1, NAME_MAX)?,
            email: Email::parse(body.email.trim())?,
            password: body.password,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub cpf: String,
    pub phone: String,
    pub photo_base64: Option<String>,
}

impl TryFrom<SignupRequest> for SignupInput {
    type Error = AppError;

    fn try_from(body: SignupRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: fields::text("name", &body.name, 1, NAME_MAX)?,
            email: Email::parse(body.email.trim())?,
            password: body.password,
            cpf: Cpf::parse(&body.cpf)?,
            phone: Phone::parse(&body.phone)?,
            photo_base64: body.photo_base64.filter(|photo| !photo.trim().is_empty()),
        })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .with_state(state)
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<SessionResponse> {
    let input = RegisterInput::try_from(body)?;
    let (token, user) = ServiceContext::from_state(&state).auth().register(input).await?;
    JsonApiResponse::created(SessionResponse {
        token: token.into(),
        user: user.into(),
    })
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> ApiResult<SignupResponse> {
    let input = SignupInput::try_from(body)?;
    let (token, user, client) = ServiceContext::from_state(&state).auth().signup(input).await?;
    let client = ClientView::new(client, &user);
    JsonApiResponse::created(SignupResponse {
        token: token.into(),
        user: user.into(),
        client,
    })
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<SessionResponse> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::invalid_credentials());
    }
    let (token, user) = ServiceContext::from_state(&state)
        .auth()
        .login(&body.email, &body.password)
        .await?;
    JsonApiResponse::ok(SessionResponse {
        token: token.into(),
        user: user.into(),
    })
}

async fn me(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
) -> ApiResult<UserView> {
    let user_id = guard.claims.subject_id()?;
    let user = ServiceContext::from_state(&state).user().require(&user_id).await?;
    JsonApiResponse::ok(user.into())
}

#[cfg(test)]
mod tests {
    use super::{RegisterRequest, SignupRequest};
    use crate::error::AppError;
    use crate::services::auth_service::{RegisterInput, SignupInput};

    fn signup_body() -> SignupRequest {
        SignupRequest {
            name: " Ana ".to_string(),
            email: "Ana@Example.com".to_string(),
            password: "correct horse".to_string(),
            cpf: "111.444.777-35".to_string(),
            phone: "(11) 98765-4321".to_string(),
            photo_base64: Some("   ".to_string()),
        }
    }

    #[test]
    fn signup_request_normalizes_documents() {
        let input = SignupInput::try_from(signup_body()).expect("valid signup");
        assert_eq!(input.name, "Ana");
        assert_eq!(input.email.as_str(), "ana@example.com");
        assert_eq!(input.cpf.as_str(), "11144477735");
        assert_eq!(input.phone.as_str(), "11987654321");
        assert!(input.photo_base64.is_none());
    }

    #[test]
    fn signup_request_rejects_bad_cpf_with_field() {
        let body = SignupRequest {
            cpf: "111.111.111-11".to_string(),
            ..signup_body()
        };
        let err = SignupInput::try_from(body).err().expect("cpf should fail");
        assert!(matches!(err, AppError::Validation { field: "cpf", .. }));
    }

    #[test]
    fn register_request_requires_a_name() {
        let body = RegisterRequest {
            name: "  ".to_string(),
            email: "ana@example.com".to_string(),
            password: "correct horse".to_string(),
        };
        let err = RegisterInput::try_from(body).err().expect("name should fail");
        assert!(matches!(err, AppError::Validation { field: "name", .. }));
    }
}
