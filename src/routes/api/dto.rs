use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::TokenBundle,
    db::{
        dao::PaginatedResponse,
        entities::{address, admin, client, employee, product, user},
    },
    error::AppError,
    services::admin_service::AdminActor,
    validation::{format_cep, format_cpf, format_phone},
};

pub const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl ProductQuery {
    /// Blank categories mean "no filter".
    pub fn category(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .map(str::to_string)
    }

    pub fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn from_paginated<M>(page: PaginatedResponse<M>, view: impl Fn(M) -> T) -> Self {
        Self {
            items: page.data.into_iter().map(view).collect(),
            page: page.page,
            page_size: page.page_size,
            has_next: page.has_next,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: usize,
}

impl From<TokenBundle> for TokenResponse {
    fn from(bundle: TokenBundle) -> Self {
        Self {
            access_token: bundle.access_token,
            token_type: bundle.token_type,
            expires_in: bundle.expires_in,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub login_method: String,
    pub last_signed_in_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

impl From<user::Model> for UserView {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            login_method: user.login_method,
            last_signed_in_at: user.last_signed_in_at,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub photo_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl ClientView {
    pub fn new(client: client::Model, user: &user::Model) -> Self {
        Self {
            id: client.id,
            user_id: client.user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            cpf: format_cpf(&client.cpf),
            phone: format_phone(&client.phone),
            photo_url: client.photo_url,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub cpf: String,
    pub phone: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<employee::Model> for EmployeeView {
    fn from(employee: employee::Model) -> Self {
        Self {
            id: employee.id,
            user_id: employee.user_id,
            cpf: format_cpf(&employee.cpf),
            phone: format_phone(&employee.phone),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddressView {
    pub id: Uuid,
    pub client_id: Uuid,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub complement: Option<String>,
    pub is_default: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<address::Model> for AddressView {
    fn from(address: address::Model) -> Self {
        Self {
            id: address.id,
            client_id: address.client_id,
            cep: format_cep(&address.cep),
            street: address.street,
            number: address.number,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
            complement: address.complement,
            is_default: address.is_default,
            created_at: address.created_at,
            updated_at: address.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in cents.
    pub price: i64,
    pub category: String,
    pub image_url: Option<String>,
    pub stock: i32,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<product::Model> for ProductView {
    fn from(product: product::Model) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image_url: product.image_url,
            stock: product.stock,
            active: product.active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminView {
    pub id: Uuid,
    pub kind: &'static str,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
}

impl From<admin::Model> for AdminView {
    fn from(admin: admin::Model) -> Self {
        Self {
            id: admin.id,
            kind: "admin",
            username: Some(admin.username),
            name: admin.name,
            email: admin.email,
        }
    }
}

impl From<AdminActor> for AdminView {
    fn from(actor: AdminActor) -> Self {
        match actor {
            AdminActor::Admin(admin) => admin.into(),
            AdminActor::User(user) => Self {
                id: user.id,
                kind: "user",
                username: None,
                name: user.name,
                email: user.email,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: TokenResponse,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub token: TokenResponse,
    pub user: UserView,
    pub client: ClientView,
}

#[derive(Debug, Serialize)]
pub struct AdminSessionResponse {
    pub token: TokenResponse,
    pub admin: AdminView,
}

pub(crate) fn require_present<T>(field: &'static str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::validation(field, format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{AddressView, AdminView, ClientView, ProductQuery, UserView};
    use crate::services::admin_service::AdminActor;
    use crate::test_helpers::{
        address_model, admin_model, client_model, user_model, user_with_hash,
    };

    #[test]
    fn user_view_never_serializes_the_password_hash() {
        let user = user_with_hash(Uuid::new_v4(), "ana@example.com", "$argon2id$secret");
        let json = serde_json::to_value(UserView::from(user)).expect("serializable");

        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("$argon2id$secret"));
        assert_eq!(json["email"], "ana@example.com");
    }

    #[test]
    fn client_view_formats_cpf_and_phone() {
        let user = user_model(Uuid::new_v4(), "ana@example.com");
        let mut client = client_model(Uuid::new_v4(), user.id, "11144477735");
        client.phone = "11987654321".to_string();

        let view = ClientView::new(client, &user);
        assert_eq!(view.cpf, "111.444.777-35");
        assert_eq!(view.phone, "(11) 98765-4321");
        assert_eq!(view.email, "ana@example.com");
    }

    #[test]
    fn address_view_formats_cep() {
        let mut address = address_model(Uuid::new_v4(), Uuid::new_v4(), true);
        address.cep = "01310100".to_string();

        assert_eq!(AddressView::from(address).cep, "01310-100");
    }

    #[test]
    fn admin_view_hides_hash_for_both_actor_kinds() {
        let admin = admin_model(Uuid::new_v4(), "root", "$argon2id$admin", true);
        let json = serde_json::to_value(AdminView::from(AdminActor::Admin(admin)))
            .expect("serializable");
        assert_eq!(json["kind"], "admin");
        assert_eq!(json["username"], "root");
        assert!(!json.to_string().contains("$argon2id$admin"));

        let user = user_model(Uuid::new_v4(), "boss@example.com");
        let json =
            serde_json::to_value(AdminView::from(AdminActor::User(user))).expect("serializable");
        assert_eq!(json["kind"], "user");
        assert!(json["username"].is_null());
    }

    #[test]
    fn blank_category_disables_the_filter() {
        let query = ProductQuery {
            category: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.category(), None);

        let query = ProductQuery {
            category: Some(" bikes ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.category().as_deref(), Some("bikes"));
        assert_eq!(query.paging().page(), 1);
        assert_eq!(query.paging().page_size(), super::DEFAULT_PAGE_SIZE);
    }
}
