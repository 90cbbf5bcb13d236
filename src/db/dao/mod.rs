pub mod address_dao;
pub mod admin_dao;
pub mod base;
pub mod base_traits;
pub mod client_dao;
mod context;
pub mod employee_dao;
pub mod error;
pub mod product_dao;
pub mod user_dao;

pub use address_dao::AddressDao;
pub use admin_dao::AdminDao;
pub use base::{DaoBase, PaginatedResponse, stamp_new, stamp_with_id};
pub use base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
pub use client_dao::ClientDao;
pub use context::DaoContext;
pub use employee_dao::EmployeeDao;
pub use error::{DaoLayerError, DaoResult};
pub use product_dao::{ProductDao, ProductFilter};
pub use user_dao::UserDao;
