pub mod address_service;
pub mod admin_service;
pub mod auth_service;
pub mod client_service;
pub mod context;
pub mod employee_service;
pub mod product_service;
pub mod user_service;

pub use context::ServiceContext;
