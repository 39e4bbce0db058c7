use bcrypt::{hash, verify, DEFAULT_COST};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{AuthPayload, Principal};

/// Token lifetime in seconds.
const TOKEN_TTL_SECS: usize = 3600; // 1 hour

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// Issue a bearer token for a logged-in principal. Claims carry id, email and
/// role so handlers can authorize without a directory lookup.
pub fn create_token(
    principal: &Principal,
    secret: &[u8],
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
        + TOKEN_TTL_SECS;

    let claims = AuthPayload {
        sub: principal.id.clone(),
        email: principal.email.clone(),
        role: principal.role,
        exp: expiration,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

pub fn validate_token(
    token: &str,
    secret: &[u8],
) -> Result<AuthPayload, jsonwebtoken::errors::Error> {
    let token_data = decode::<AuthPayload>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_token_roundtrip_carries_role() {
        let principal = Principal {
            id: "p1".to_string(),
            email: "admin@hotel.com".to_string(),
            name: "Admin User".to_string(),
            role: Role::Admin,
            phone: None,
            address: None,
        };
        let secret = b"test_secret";
        let token = create_token(&principal, secret).expect("token issue failed");
        let claims = validate_token(&token, secret).expect("token validation failed");
        assert_eq!(claims.sub, "p1");
        assert_eq!(claims.email, "admin@hotel.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let principal = Principal {
            id: "p1".to_string(),
            email: "staff@hotel.com".to_string(),
            name: "Staff Member".to_string(),
            role: Role::Staff,
            phone: None,
            address: None,
        };
        let token = create_token(&principal, b"secret_a").unwrap();
        assert!(validate_token(&token, b"secret_b").is_err());
    }
}
