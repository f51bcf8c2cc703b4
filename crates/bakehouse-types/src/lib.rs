//! Shared model types for the Bakehouse control plane.
//!
//! Pure data: job identifiers, the submit/track boundary handle,
//! backend-reported job states, option maps, and the opaque recipe
//! payload. Kept free of engine dependencies so backend adapters and
//! external drivers can share them without pulling in the runtime.

pub mod job;
pub mod options;
pub mod recipe;

pub use job::{JobHandle, JobId, JobName, JobState, SubmitStatus};
pub use options::{OptionSet, OptionSetBuilder, OptionValue};
pub use recipe::Recipe;
