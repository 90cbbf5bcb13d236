pub mod fields;
pub mod validators;

pub use fields::{Cep, Cpf, Email, Phone};
pub use validators::{
    clean_number, format_cep, format_cpf, format_phone, is_valid_cep, is_valid_cpf,
    is_valid_email, is_valid_phone,
};
