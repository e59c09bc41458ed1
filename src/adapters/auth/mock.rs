//! Mock identity verifier for testing.
//!
//! Accepts tokens of the form `member-<id>` and `admin-<id>`; anything
//! else is invalid.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedMember, MemberId, MemberRole};
use crate::ports::IdentityVerifier;

/// Pattern-based verifier with no cryptography.
pub struct MockIdentityVerifier;

impl MockIdentityVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockIdentityVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedMember, AuthError> {
        let (role, raw_id) = if let Some(id) = token.strip_prefix("member-") {
            (MemberRole::Member, id)
        } else if let Some(id) = token.strip_prefix("admin-") {
            (MemberRole::Admin, id)
        } else {
            return Err(AuthError::InvalidToken(format!(
                "Unrecognized mock token: {}",
                token
            )));
        };

        let id: MemberId = raw_id
            .parse()
            .map_err(|_| AuthError::InvalidToken("Non-numeric mock token id".to_string()))?;

        Ok(AuthenticatedMember { id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn member_and_admin_tokens_parse() {
        let verifier = MockIdentityVerifier::new();

        let member = verifier.verify("member-7").await.unwrap();
        assert_eq!(member.id, MemberId::new(7));
        assert!(!member.is_admin());

        let admin = verifier.verify("admin-1").await.unwrap();
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn unknown_tokens_are_rejected() {
        let verifier = MockIdentityVerifier::new();
        assert!(verifier.verify("bearer-xyz").await.is_err());
    }
}
