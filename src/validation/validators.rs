//! Brazilian document and contact validators.
//!
//! Every function here is pure: it takes a raw (possibly formatted) string and returns a
//! verdict or a rendering. Turning a negative verdict into an error is the caller's job, see
//! [`super::fields`].

use std::sync::LazyLock;

use regex::Regex;

pub const CPF_LEN: usize = 11;
pub const CEP_LEN: usize = 8;
pub const EMAIL_MAX_LEN: usize = 320;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|err| panic!("email regex: {err}"))
});

/// Keeps only the ASCII digits of `value`.
pub fn clean_number(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digits_of(cleaned: &str) -> Vec<u32> {
    cleaned.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

fn cpf_check_digit(digits: &[u32]) -> u32 {
    // weights run from digits.len() + 1 down to 2
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(idx, digit)| digit * (top - idx as u32))
        .sum();
    match (sum * 10) % 11 {
        10 | 11 => 0,
        rest => rest,
    }
}

pub fn is_valid_cpf(cpf: &str) -> bool {
    let digits = digits_of(&clean_number(cpf));
    if digits.len() != CPF_LEN || all_same(&digits) {
        return false;
    }

    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

/// Renders a CPF as `XXX.XXX.XXX-XX`. Anything that does not clean down to exactly 11 digits
/// comes back as its cleaned digits.
pub fn format_cpf(cpf: &str) -> String {
    let cleaned: String = clean_number(cpf).chars().take(CPF_LEN).collect();
    if cleaned.len() != CPF_LEN {
        return cleaned;
    }
    format!(
        "{}.{}.{}-{}",
        &cleaned[..3],
        &cleaned[3..6],
        &cleaned[6..9],
        &cleaned[9..]
    )
}

pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    if email.chars().count() > EMAIL_MAX_LEN {
        return false;
    }
    EMAIL_RE.is_match(email)
}

/// Accepts 10-digit landlines and 11-digit mobiles with a real area code (11..=99).
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = digits_of(&clean_number(phone));
    let len = digits.len();
    if len != 10 && len != 11 {
        return false;
    }
    if all_same(&digits) {
        return false;
    }

    let area_code = digits[0] * 10 + digits[1];
    if !(11..=99).contains(&area_code) {
        return false;
    }

    let prefix = digits[2];
    match len {
        11 => prefix == 9,
        _ => (2..=9).contains(&prefix),
    }
}

pub fn format_phone(phone: &str) -> String {
    let cleaned = clean_number(phone);
    match cleaned.len() {
        11 => format!("({}) {}-{}", &cleaned[..2], &cleaned[2..7], &cleaned[7..]),
        10 => format!("({}) {}-{}", &cleaned[..2], &cleaned[2..6], &cleaned[6..]),
        _ => cleaned,
    }
}

pub fn is_valid_cep(cep: &str) -> bool {
    clean_number(cep).len() == CEP_LEN
}

pub fn format_cep(cep: &str) -> String {
    let cleaned: String = clean_number(cep).chars().take(CEP_LEN).collect();
    if cleaned.len() != CEP_LEN {
        return cleaned;
    }
    format!("{}-{}", &cleaned[..5], &cleaned[5..])
}
