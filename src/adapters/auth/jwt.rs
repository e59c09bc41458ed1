//! JWT identity verifier (HS256).
//!
//! Verifies bearer tokens minted by the surrounding identity service.
//! Claims carry the member id in `sub` and the role in `role`; expiry
//! is enforced by the library.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedMember, MemberId, MemberRole};
use crate::ports::IdentityVerifier;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Member id, stringified.
    sub: String,
    /// "MEMBER" or "ADMIN".
    role: String,
    /// Expiry, seconds since epoch.
    exp: i64,
}

/// HS256 token verifier.
pub struct JwtIdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedMember, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let member_id: MemberId = data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("Non-numeric subject claim".to_string()))?;

        let role = match data.claims.role.as_str() {
            "ADMIN" => MemberRole::Admin,
            "MEMBER" => MemberRole::Member,
            other => {
                return Err(AuthError::InvalidToken(format!("Unknown role: {}", other)));
            }
        };

        Ok(AuthenticatedMember {
            id: member_id,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token(sub: &str, role: &str, exp_offset_secs: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn verifier() -> JwtIdentityVerifier {
        JwtIdentityVerifier::new(Secret::new(SECRET.to_string()))
    }

    #[tokio::test]
    async fn valid_token_yields_member_identity() {
        let member = verifier().verify(&token("42", "MEMBER", 3600)).await.unwrap();
        assert_eq!(member.id, MemberId::new(42));
        assert_eq!(member.role, MemberRole::Member);
        assert!(!member.is_admin());
    }

    #[tokio::test]
    async fn admin_role_is_recognized() {
        let member = verifier().verify(&token("1", "ADMIN", 3600)).await.unwrap();
        assert!(member.is_admin());
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let err = verifier()
            .verify(&token("42", "MEMBER", -3600))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let err = verifier().verify("not.a.token").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let err = verifier()
            .verify(&token("42", "SUPERUSER", 3600))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }
}
