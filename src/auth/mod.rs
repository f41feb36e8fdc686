use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Caller role carried in the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Employee,
}

const DEFAULT_EXPIRY_HOURS: i64 = 2;

/// Expiry timestamp; hours beyond chrono's range fall back to the default
fn expires_at(now: DateTime<Utc>, hours: u64) -> i64 {
    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(now + Duration::hours(DEFAULT_EXPIRY_HOURS))
        .timestamp()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// employee_id or customer_id
    pub sub: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        let exp = expires_at(now, config::config().security.jwt_expiry_hours);

        Self {
            sub: sub.into(),
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

fn secret() -> Result<&'static str, AuthError> {
    let secret = config::config().security.jwt_secret.as_str();
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }
    Ok(secret)
}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    let encoding_key = EncodingKey::from_secret(secret()?.as_bytes());
    Ok(encode(&Header::default(), claims, &encoding_key)?)
}

/// Verify signature and expiry
pub fn validate_jwt(token: &str) -> Result<Claims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret()?.as_bytes());
    let data = decode::<Claims>(token, &decoding_key, &Validation::default())?;
    Ok(data.claims)
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// A malformed stored hash counts as a mismatch
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_keeps_role_and_subject() {
        let claims = Claims::new("42", Role::Employee);
        let token = generate_jwt(&claims).unwrap();
        let decoded = validate_jwt(&token).unwrap();

        assert_eq!(decoded.sub, "42");
        assert_eq!(decoded.role, Role::Employee);
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = generate_jwt(&Claims::new("1", Role::Customer)).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(validate_jwt(&tampered).is_err());
        assert!(validate_jwt("not-a-token").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::new("1", Role::Customer);
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;
        let token = generate_jwt(&claims).unwrap();
        assert!(validate_jwt(&token).is_err());
    }

    #[test]
    fn oversized_expiry_falls_back_to_default() {
        let now = Utc::now();
        assert_eq!(expires_at(now, 24), (now + Duration::hours(24)).timestamp());
        assert_eq!(expires_at(now, u64::MAX), (now + Duration::hours(2)).timestamp());
        assert_eq!(expires_at(now, i64::MAX as u64), (now + Duration::hours(2)).timestamp());
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("hunter2", 4).unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("hunter2", "not-a-hash"));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"employee\"");
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"customer\"");
    }
}
