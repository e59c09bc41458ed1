//! Identity verifier port.
//!
//! Authentication lives entirely at the edge: the HTTP middleware hands
//! a bearer token to this port and receives the authenticated member.
//! The core only performs authorization checks against that identity.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedMember};

/// Port for verifying bearer tokens.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify a token and return the member it identifies.
    ///
    /// # Errors
    ///
    /// - `TokenExpired` when the token's lifetime has passed
    /// - `InvalidToken` for anything malformed or tampered
    /// - `ServiceUnavailable` when verification infrastructure is down
    async fn verify(&self, token: &str) -> Result<AuthenticatedMember, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn identity_verifier_is_object_safe() {
        fn _accepts_dyn(_verifier: &dyn IdentityVerifier) {}
    }
}
