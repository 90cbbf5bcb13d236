use crate::error::AppError;

use super::validators::{
    clean_number, format_cep, format_cpf, format_phone, is_valid_cep, is_valid_cpf,
    is_valid_email, is_valid_phone,
};

/// A CPF that passed the checksum, held as its 11 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if !is_valid_cpf(raw) {
            return Err(AppError::validation("cpf", "Invalid CPF"));
        }
        Ok(Self(clean_number(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn formatted(&self) -> String {
        format_cpf(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A Brazilian phone number held as its 10 or 11 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if !is_valid_phone(raw) {
            return Err(AppError::validation("phone", "Invalid phone number"));
        }
        Ok(Self(clean_number(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn formatted(&self) -> String {
        format_phone(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cep(String);

impl Cep {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if !is_valid_cep(raw) {
            return Err(AppError::validation("cep", "CEP must have 8 digits"));
        }
        Ok(Self(clean_number(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn formatted(&self) -> String {
        format_cep(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Syntactically valid email, lower-cased so uniqueness checks are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if !is_valid_email(raw) {
            return Err(AppError::validation("email", "Invalid email"));
        }
        Ok(Self(raw.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Trims `value` and checks its length in characters.
pub fn text(field: &'static str, value: &str, min: usize, max: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min {
        return Err(if min <= 1 {
            AppError::validation(field, format!("{field} is required"))
        } else {
            AppError::validation(field, format!("{field} must have at least {min} characters"))
        });
    }
    if len > max {
        return Err(AppError::validation(
            field,
            format!("{field} must have at most {max} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text collapses to `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => text(field, value, 1, max).map(Some),
    }
}

/// Two-letter federative unit code, stored upper-case.
pub fn state_code(value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::validation("state", "state must have 2 letters"));
    }
    Ok(trimmed.to_ascii_uppercase())
}

pub fn non_negative(field: &'static str, value: i64) -> Result<i64, AppError> {
    if value < 0 {
        return Err(AppError::validation(field, format!("{field} must not be negative")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_is_stored_as_digits_and_formatted_on_demand() {
        let cpf = Cpf::parse("111.444.777-35").expect("cpf should parse");
        assert_eq!(cpf.as_str(), "11144477735");
        assert_eq!(cpf.formatted(), "111.444.777-35");
    }

    #[test]
    fn invalid_values_name_their_field() {
        let cases = [
            Cpf::parse("123").map(|_| ()),
            Phone::parse("119999999").map(|_| ()),
            Cep::parse("123").map(|_| ()),
            Email::parse("user @example.com").map(|_| ()),
        ];
        let fields: Vec<_> = cases
            .into_iter()
            .map(|result| match result {
                Err(AppError::Validation { field, .. }) => field,
                other => panic!("expected validation error, got {other:?}"),
            })
            .collect();
        assert_eq!(fields, vec!["cpf", "phone", "cep", "email"]);
    }

    #[test]
    fn email_is_lower_cased() {
        let email = Email::parse("Ana.Souza@Example.COM").expect("email should parse");
        assert_eq!(email.as_str(), "ana.souza@example.com");
    }

    #[test]
    fn text_trims_and_enforces_bounds() {
        assert_eq!(text("street", "  Rua Augusta ", 3, 255).expect("ok"), "Rua Augusta");
        assert!(text("street", "Ru", 3, 255).is_err());
        assert!(text("number", "", 1, 20).is_err());
        assert!(text("number", &"9".repeat(21), 1, 20).is_err());
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text("complement", Some("   "), 255).expect("ok"), None);
        assert_eq!(optional_text("complement", None, 255).expect("ok"), None);
        assert_eq!(
            optional_text("complement", Some(" apto 12 "), 255).expect("ok"),
            Some("apto 12".to_string())
        );
    }

    #[test]
    fn state_code_is_two_letters() {
        assert_eq!(state_code("sp").expect("ok"), "SP");
        assert!(state_code("SPA").is_err());
        assert!(state_code("S1").is_err());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert_eq!(non_negative("price", 0).expect("ok"), 0);
        assert!(non_negative("stock", -1).is_err());
    }
}
