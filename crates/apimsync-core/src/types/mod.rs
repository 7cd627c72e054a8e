//! Type definitions shared across the apimsync pipeline

mod canonical_types;
mod platform_types;
mod sync_types;

pub use canonical_types::*;
pub use platform_types::*;
pub use sync_types::*;
