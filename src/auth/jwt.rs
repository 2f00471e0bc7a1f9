use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::User;
use crate::policy::Role;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, expiry_secs: i64) -> Self {
        Self {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: (Utc::now() + Duration::seconds(expiry_secs)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::now_v7(),
            email: "approver@example.com".to_string(),
            username: "approver".to_string(),
            role: Role::DocumentApprover,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips() {
        let user = sample_user();
        let claims = Claims::new(&user, 7200);
        let token = encode_token(&claims, "secret").unwrap();
        let decoded = decode_token(&token, "secret").unwrap();
        assert_eq!(decoded.sub, user.id);
        assert_eq!(decoded.email, user.email);
        assert_eq!(decoded.role, Role::DocumentApprover);
    }

    #[test]
    fn wrong_secret_rejected() {
        let claims = Claims::new(&sample_user(), 7200);
        let token = encode_token(&claims, "secret").unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let claims = Claims::new(&sample_user(), -120);
        let token = encode_token(&claims, "secret").unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }
}
