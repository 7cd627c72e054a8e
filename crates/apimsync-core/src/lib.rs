//! # apimsync-core
//!
//! Core library for apimsync providing:
//! - Configuration file parsing (apimsync.yaml) and boundary overrides
//! - Platform-native, canonical and onramp API types
//! - Group key and version-qualified name derivation
//! - The on-disk staging layout shared by every pipeline stage

pub mod config;
pub mod error;
pub mod naming;
pub mod staging;
pub mod types;

pub use config::ApimSyncConfig;
pub use error::{Error, Result};
pub use staging::Stager;
