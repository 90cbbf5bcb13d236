pub mod jwt;
pub mod password;
mod types;

pub use types::{AdminRole, Claims, Principal, RequiredRole, Role, TokenBundle, UserRole};
