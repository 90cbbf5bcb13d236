use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{addresses, admin, auth, clients, employees, products, public};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router())
        .merge(auth::router(state.clone()))
        .merge(clients::router(state.clone()))
        .merge(employees::router(state.clone()))
        .merge(addresses::router(state.clone()))
        .merge(products::router(state.clone()))
        .merge(admin::router(state))
}
