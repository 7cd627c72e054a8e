//! Token source trait and implementations

pub mod client_credentials;
pub mod supplied;

use crate::types::ResolvedToken;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for token sources
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Resolve a token from this source
    ///
    /// Returns Ok(Some(token)) if a token was obtained
    /// Returns Ok(None) if this source has nothing to offer
    /// Returns Err if the source was attempted and failed
    async fn resolve(&self) -> Result<Option<ResolvedToken>>;

    /// Source name for audit and error messages
    fn name(&self) -> &'static str;
}

pub use client_credentials::ClientCredentialsSource;
pub use supplied::SuppliedSource;
