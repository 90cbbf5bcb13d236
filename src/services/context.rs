use sea_orm::DatabaseConnection;

use crate::{
    auth::jwt::TokenIssuer,
    db::dao::DaoContext,
    services::{
        address_service::AddressService, admin_service::AdminService, auth_service::AuthService,
        client_service::ClientService, employee_service::EmployeeService,
        product_service::ProductService, user_service::UserService,
    },
    state::AppState,
    storage::PhotoUploader,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
    tokens: TokenIssuer,
    photos: PhotoUploader,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection, tokens: TokenIssuer, photos: PhotoUploader) -> Self {
        Self {
            daos: DaoContext::new(db),
            tokens,
            photos,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db, state.tokens.clone(), state.photos.clone())
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(&self.daos, self.tokens.clone(), self.photos.clone())
    }

    pub fn client(&self) -> ClientService {
        ClientService::new(self.daos.client(), self.daos.user(), self.photos.clone())
    }

    pub fn employee(&self) -> EmployeeService {
        EmployeeService::new(self.daos.employee(), self.daos.user())
    }

    pub fn address(&self) -> AddressService {
        AddressService::new(self.daos.address(), self.daos.client())
    }

    pub fn product(&self) -> ProductService {
        ProductService::new(self.daos.product())
    }

    pub fn admin(&self) -> AdminService {
        AdminService::new(self.daos.admin(), self.daos.user())
    }
}
