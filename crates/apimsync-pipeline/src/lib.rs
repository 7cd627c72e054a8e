//! Staging pipeline for apimsync
//!
//! Stages run strictly one after another and one API at a time:
//!
//! - `exporter`: platform-native descriptors and schemas into `export/`
//! - `offramp`: `export/` into the platform-agnostic `canonical/` area
//! - `onramp`: `canonical/` into destination-native records under `onramp/`
//! - `importer`: `onramp/` into the destination catalog
//!
//! Every stage returns a `StageReport`; a failing API is recorded there and
//! the stage moves on to the next one.

pub mod exporter;
pub mod importer;
pub mod offramp;
pub mod onramp;
pub mod orchestrator;
pub mod report;
mod status;

pub use orchestrator::{sync_response, Orchestrator};
pub use report::{ApiFailure, Stage, StageReport};
