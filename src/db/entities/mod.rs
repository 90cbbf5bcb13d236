#[allow(unused_imports)]
pub mod prelude {
    pub use super::address::Entity as Address;
    pub use super::admin::Entity as Admin;
    pub use super::client::Entity as Client;
    pub use super::employee::Entity as Employee;
    pub use super::product::Entity as Product;
    pub use super::user::Entity as User;
}

pub mod address;
pub mod admin;
pub mod client;
pub mod employee;
pub mod product;
pub mod user;
