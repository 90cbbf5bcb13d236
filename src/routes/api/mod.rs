pub mod addresses;
pub mod admin;
pub mod auth;
pub mod clients;
pub mod dto;
pub mod employees;
pub mod products;
pub mod public;
mod router;

pub use router::router;
