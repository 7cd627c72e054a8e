//! Token acquisition for apimsync
//!
//! Platform clients never look at the environment themselves. The CLI or
//! HTTP boundary captures any supplied token, environment token and client
//! credentials into the configuration; this crate turns them into a bearer
//! token:
//! - **Ordered sources**: supplied token, environment token, client-credentials exchange
//! - **Security**: tokens held in zeroizing `SecureString`, audit logging without values
//! - **No exceptions**: every failure collapses to "no token"

pub mod resolver;
pub mod security;
pub mod sources;
pub mod types;

pub use resolver::{TokenProvider, TokenResolver};
pub use security::{sanitize_error, AuditLog, SecureString};
pub use sources::{ClientCredentialsSource, SuppliedSource, TokenSource};
pub use types::{ResolvedFrom, ResolvedToken, TokenResponse};
