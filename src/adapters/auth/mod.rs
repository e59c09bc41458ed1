//! Identity verification adapters.

mod jwt;
mod mock;

pub use jwt::JwtIdentityVerifier;
pub use mock::MockIdentityVerifier;
