//! Authentication types for the domain layer.
//!
//! These types represent an authenticated member as injected by the
//! surrounding authentication middleware. They have **no provider
//! dependencies** - any token scheme can populate them via the
//! `IdentityVerifier` port. The core never performs credential checks,
//! only authorization checks against the injected identity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MemberId;

/// Role set carried by an authenticated member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Member,
    Admin,
}

/// Authenticated member identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedMember {
    /// The unique member identifier from the identity layer.
    pub id: MemberId,

    /// Role used for authorization checks (admin-only review).
    pub role: MemberRole,
}

impl AuthenticatedMember {
    /// Creates a new authenticated member.
    pub fn new(id: MemberId, role: MemberRole) -> Self {
        Self { id, role }
    }

    /// Returns true if the member carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// Authentication errors that can occur during token verification.
///
/// Domain-centric: they describe what went wrong from the application's
/// perspective, not the identity provider's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_detected() {
        let admin = AuthenticatedMember::new(MemberId::new(1), MemberRole::Admin);
        let member = AuthenticatedMember::new(MemberId::new(2), MemberRole::Member);
        assert!(admin.is_admin());
        assert!(!member.is_admin());
    }

    #[test]
    fn member_role_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&MemberRole::Admin).unwrap(),
            "\"ADMIN\""
        );
    }
}
