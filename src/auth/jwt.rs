use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use super::{Claims, Principal, Role, TokenBundle};
use crate::error::AppError;

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

pub fn now_unix() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as usize)
        .unwrap_or_default()
}

pub fn encode_token(keys: &JwtKeys, claims: &Claims) -> Result<String, AppError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());

    encode(&header, claims, &keys.enc)
        .map_err(|err| AppError::internal_with_source("Token encoding failed", err))
}

/// Verifies signature and expiry.
pub fn decode_token(keys: &JwtKeys, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &keys.dec, &validation)?;
    Ok(data.claims)
}

pub fn make_access_claims(
    subject: &Uuid,
    principal: Principal,
    roles: Vec<Role>,
    ttl_secs: usize,
) -> Claims {
    let iat = now_unix();
    let exp = iat + ttl_secs;
    Claims {
        sub: subject.to_string(),
        roles,
        iat,
        exp,
        principal,
    }
}

pub fn issue_token(
    keys: &JwtKeys,
    subject: &Uuid,
    principal: Principal,
    roles: Vec<Role>,
    ttl_secs: usize,
) -> Result<TokenBundle, AppError> {
    let claims = make_access_claims(subject, principal, roles, ttl_secs);
    Ok(TokenBundle {
        access_token: encode_token(keys, &claims)?,
        token_type: "Bearer",
        expires_in: ttl_secs,
    })
}

/// Signing keys plus the access-token lifetime used for every issued token.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: JwtKeys,
    ttl_secs: usize,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_secs: usize) -> Self {
        Self {
            keys: JwtKeys::from_secret(secret),
            ttl_secs,
        }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    pub fn ttl_secs(&self) -> usize {
        self.ttl_secs
    }

    pub fn issue(
        &self,
        subject: &Uuid,
        principal: Principal,
        roles: Vec<Role>,
    ) -> Result<TokenBundle, AppError> {
        issue_token(&self.keys, subject, principal, roles, self.ttl_secs)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode_token(&self.keys, token)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!(error = %err, "rejected bearer token");
        AppError::unauthorized("Invalid or expired token")
    }
}
