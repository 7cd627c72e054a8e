//! Tokens handed over at the boundary
//!
//! Covers both a token passed explicitly (flag or request) and one the CLI
//! picked up from the environment. Neither touches the network.

use crate::sources::TokenSource;
use crate::types::{ResolvedFrom, ResolvedToken};
use crate::SecureString;
use anyhow::Result;
use async_trait::async_trait;

pub struct SuppliedSource {
    token: Option<SecureString>,
    origin: ResolvedFrom,
}

impl SuppliedSource {
    /// A token passed explicitly
    pub fn supplied(token: Option<&str>) -> Self {
        Self::new(token, ResolvedFrom::Supplied)
    }

    /// A token sourced from the environment
    pub fn environment(token: Option<&str>) -> Self {
        Self::new(token, ResolvedFrom::Environment)
    }

    fn new(token: Option<&str>, origin: ResolvedFrom) -> Self {
        Self {
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(SecureString::from),
            origin,
        }
    }

    /// Whether this source holds a token at all
    pub fn is_set(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl TokenSource for SuppliedSource {
    async fn resolve(&self) -> Result<Option<ResolvedToken>> {
        Ok(self
            .token
            .clone()
            .map(|token| ResolvedToken::new(token, self.origin.clone())))
    }

    fn name(&self) -> &'static str {
        match self.origin {
            ResolvedFrom::Environment => "environment",
            _ => "supplied",
        }
    }
}
