//! Bakery control plane for remote pipeline execution.
//!
//! Turns a validated backend configuration and an opaque recipe into a
//! running remote job, then polls that job to a terminal outcome:
//! build options -> validate -> submit -> poll -> Succeeded / Failed /
//! TimedOut. The recipe execution engine, storage layers, and CLI driver
//! are external collaborators.

pub mod bakery;
pub mod config;
pub mod error;
pub mod gcloud;
pub mod tracker;

// Re-export public API for convenience
pub use bakery::{Bakery, BackendRequirements, DataflowBakery, JobLauncher};
pub use config::types::DataflowConfig;
pub use error::{BakeryError, TrackError};
pub use tracker::{track, JobStatusSource, TrackOutcome, TrackerConfig};
