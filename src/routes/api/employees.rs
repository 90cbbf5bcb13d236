use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::UserRole,
    error::AppError,
    middleware::{AdminGuard, AuthRoleGuard},
    response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, employee_service::NewEmployee},
    state::AppState,
    validation::{Cpf, Phone},
};

use super::dto::{EmployeeView, Page, PageQuery, require_present};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateEmployeeRequest {
    pub user_id: Option<Uuid>,
    pub cpf: String,
    pub phone: String,
}

impl TryFrom<CreateEmployeeRequest> for NewEmployee {
    type Error = AppError;

    fn try_from(body: CreateEmployeeRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: require_present("user_id", body.user_id)?,
            cpf: Cpf::parse(&body.cpf)?,
            phone: Phone::parse(&body.phone)?,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/me", get(my_employee))
        .with_state(state)
}

async fn create_employee(
    State(state): State<Arc<AppState>>,
    guard: AdminGuard,
    Json(body): Json<CreateEmployeeRequest>,
) -> ApiResult<EmployeeView> {
    let input = NewEmployee::try_from(body)?;
    let employee = ServiceContext::from_state(&state)
        .employee()
        .create(input)
        .await?;
    tracing::info!(by = guard.actor.name(), employee_id = %employee.id, "employee registered");
    JsonApiResponse::created(employee.into())
}

async fn list_employees(
    State(state): State<Arc<AppState>>,
    _guard: AdminGuard,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<EmployeeView>> {
    let page = ServiceContext::from_state(&state)
        .employee()
        .list(query.page(), query.page_size())
        .await?;
    JsonApiResponse::ok(Page::from_paginated(page, EmployeeView::from))
}

async fn my_employee(
    State(state): State<Arc<AppState>>,
    guard: AuthRoleGuard<UserRole>,
) -> ApiResult<EmployeeView> {
    let user_id = guard.claims.subject_id()?;
    let employee = ServiceContext::from_state(&state).employee().me(user_id).await?;
    JsonApiResponse::ok(employee.into())
}
