//! Bakery capability trait and backend seams.
//!
//! A bakery turns a recipe plus a validated configuration into a running
//! remote job. Backends are added as new [`Bakery`] implementors; the
//! validator and tracker contracts do not change with the backend.

mod dataflow;

pub use dataflow::DataflowBakery;

use async_trait::async_trait;
use bakehouse_types::{JobHandle, JobId, JobName, OptionSet, Recipe};

use crate::error::BakeryError;

/// Static description of a backend's capabilities and requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendRequirements {
    /// The backend/runner selector literal placed in the option set.
    pub runner: &'static str,
    /// URI scheme required for the temp storage location.
    pub temp_location_scheme: &'static str,
    /// Whether `submit` blocks until job completion. The Dataflow backend
    /// is fire-and-forget; tracking is a separate, explicit step.
    pub blocking_submission: bool,
}

/// The backend's native submission seam.
///
/// An external collaborator: implementations hand the recipe and the
/// built option set to the backend's own submission machinery and return
/// the backend-assigned job id. Submission is a non-idempotent remote
/// effect; implementations must not retry on their own.
///
/// Implementations must be `Send + Sync` for use behind `Arc<dyn JobLauncher>`.
#[async_trait]
pub trait JobLauncher: Send + Sync {
    /// Launch a job, returning the backend-assigned id.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection verbatim.
    async fn launch(&self, recipe: &Recipe, options: &OptionSet) -> anyhow::Result<JobId>;
}

/// A backend that can bake recipes into running remote jobs.
#[async_trait]
pub trait Bakery: Send + Sync {
    /// Describe this backend's capabilities and requirements.
    fn describe_requirements(&self) -> BackendRequirements;

    /// Build the backend-native option set for one `(job_name,
    /// container_image)` pair. Pure; touches no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`BakeryError::MissingField`] when a required
    /// configuration field is absent.
    fn build_options(
        &self,
        job_name: &JobName,
        container_image: &str,
    ) -> Result<OptionSet, BakeryError>;

    /// Validate, build options, and submit the recipe. Fire-and-forget:
    /// returns as soon as the backend accepts the job.
    ///
    /// # Errors
    ///
    /// Returns [`BakeryError::MissingField`] before any remote call when
    /// validation fails, or [`BakeryError::Submission`] when the backend
    /// rejects the job. Never retried here: a retry after a transient
    /// submission error risks a duplicate remote job.
    async fn submit(
        &self,
        recipe: &Recipe,
        job_name: &JobName,
        container_image: &str,
    ) -> Result<JobHandle, BakeryError>;
}
