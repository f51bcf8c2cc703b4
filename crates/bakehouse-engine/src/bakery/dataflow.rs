//! Google Cloud Dataflow bakery.

use std::sync::Arc;

use async_trait::async_trait;
use bakehouse_types::{JobHandle, JobName, OptionSet, Recipe};

use crate::bakery::{Bakery, BackendRequirements, JobLauncher};
use crate::config::types::{DataflowConfig, TEMP_LOCATION_SCHEME};
use crate::config::validator;
use crate::error::BakeryError;

/// Runner selector literal Dataflow expects in the option set.
const RUNNER: &str = "DataflowRunner";

/// Experiments required for the v2 execution engine.
const REQUIRED_EXPERIMENTS: [&str; 1] = ["use_runner_v2"];

/// Serialization library required for correct distributed execution of
/// interpreted pipeline code on Dataflow workers.
const PICKLE_LIBRARY: &str = "cloudpickle";

/// Bakery for Google Cloud Dataflow.
///
/// Owns its [`DataflowConfig`] for its whole lifetime; the caller mutates
/// the config in place (via [`config_mut`](Self::config_mut)) between
/// submissions.
pub struct DataflowBakery {
    config: DataflowConfig,
    launcher: Arc<dyn JobLauncher>,
}

impl DataflowBakery {
    /// Create a bakery from an explicit configuration.
    #[must_use]
    pub fn new(config: DataflowConfig, launcher: Arc<dyn JobLauncher>) -> Self {
        Self { config, launcher }
    }

    /// Create a bakery whose project id is read once from the ambient
    /// `gcloud` default. The read happens here and never again; tests
    /// construct a [`DataflowConfig`] directly instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the ambient lookup itself fails. An unset
    /// ambient project is not an error; it surfaces later as a missing
    /// required field at options-build time.
    pub async fn from_ambient(launcher: Arc<dyn JobLauncher>) -> anyhow::Result<Self> {
        let mut config = DataflowConfig::default();
        config.project_id = crate::gcloud::ambient_project().await?;
        Ok(Self::new(config, launcher))
    }

    /// The owned configuration.
    #[must_use]
    pub fn config(&self) -> &DataflowConfig {
        &self.config
    }

    /// Mutable access for the owning caller.
    pub fn config_mut(&mut self) -> &mut DataflowConfig {
        &mut self.config
    }
}

/// Map a validated configuration to Dataflow's native option schema.
///
/// Deterministic: every set field lands under its Dataflow key, the job
/// name and container image pass through verbatim, and the only additions
/// beyond the config are the fixed runtime flags the engine requires.
///
/// Precondition: `validate_required` has passed; `project_id` and
/// `temp_gcs_location` are present.
fn dataflow_options(config: &DataflowConfig, job_name: &JobName, container_image: &str) -> OptionSet {
    let project = config.project_id.clone().unwrap_or_default();
    let temp_location = config.temp_gcs_location().unwrap_or_default().to_string();

    OptionSet::builder()
        .set("project", project)
        .set("region", config.region.as_str())
        .set("machine_type", config.machine_type.as_str())
        .set("use_public_ips", config.use_public_ips)
        .set("temp_location", temp_location)
        .set("experiments", REQUIRED_EXPERIMENTS.to_vec())
        .set("save_main_session", true)
        .set("pickle_library", PICKLE_LIBRARY)
        .set("sdk_container_image", container_image)
        .set("job_name", job_name.as_str())
        .set("runner", RUNNER)
        .build()
}

#[async_trait]
impl Bakery for DataflowBakery {
    fn describe_requirements(&self) -> BackendRequirements {
        BackendRequirements {
            runner: RUNNER,
            temp_location_scheme: TEMP_LOCATION_SCHEME,
            blocking_submission: false,
        }
    }

    fn build_options(
        &self,
        job_name: &JobName,
        container_image: &str,
    ) -> Result<OptionSet, BakeryError> {
        validator::validate_required(&self.config)?;
        Ok(dataflow_options(&self.config, job_name, container_image))
    }

    async fn submit(
        &self,
        recipe: &Recipe,
        job_name: &JobName,
        container_image: &str,
    ) -> Result<JobHandle, BakeryError> {
        // Validation blocks before any remote resource is created.
        let options = self.build_options(job_name, container_image)?;

        tracing::info!(
            job_name = %job_name,
            container_image,
            runner = RUNNER,
            "Submitting Dataflow job"
        );

        let job_id = self
            .launcher
            .launch(recipe, &options)
            .await
            .map_err(BakeryError::Submission)?;

        tracing::info!(job_id = %job_id, job_name = %job_name, "Job submitted");

        Ok(JobHandle::submitted(job_id, job_name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bakehouse_types::{JobId, OptionValue};

    /// Launcher that records calls and hands out a fixed job id.
    struct RecordingLauncher {
        calls: AtomicUsize,
    }

    impl RecordingLauncher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl JobLauncher for RecordingLauncher {
        async fn launch(&self, _recipe: &Recipe, _options: &OptionSet) -> anyhow::Result<JobId> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(JobId::new("2024-01-01_job_abc123"))
        }
    }

    struct RejectingLauncher;

    #[async_trait]
    impl JobLauncher for RejectingLauncher {
        async fn launch(&self, _recipe: &Recipe, _options: &OptionSet) -> anyhow::Result<JobId> {
            anyhow::bail!("quota exceeded in region")
        }
    }

    fn full_config() -> DataflowConfig {
        let mut config = DataflowConfig::default();
        config.project_id = Some("hello".to_string());
        config.region = "us-west1".to_string();
        config.machine_type = "n1-standard-2".to_string();
        config.use_public_ips = true;
        config.set_temp_gcs_location("gs://something").unwrap();
        config
    }

    fn recipe() -> Recipe {
        Recipe::new(serde_json::json!({"repo": "https://example.com/feedstock.git", "ref": "0.9.x"}))
    }

    #[test]
    fn build_options_maps_every_field() {
        let bakery = DataflowBakery::new(full_config(), RecordingLauncher::new());
        let opts = bakery
            .build_options(&JobName::new("job"), "some-container:some-tag")
            .unwrap();

        assert_eq!(opts.get("project"), Some(&OptionValue::Str("hello".into())));
        assert_eq!(opts.get("use_public_ips"), Some(&OptionValue::Bool(true)));
        assert_eq!(
            opts.get("temp_location"),
            Some(&OptionValue::Str("gs://something".into()))
        );
        assert_eq!(
            opts.get("machine_type"),
            Some(&OptionValue::Str("n1-standard-2".into()))
        );
        assert_eq!(opts.get("region"), Some(&OptionValue::Str("us-west1".into())));
        assert_eq!(
            opts.get("experiments"),
            Some(&OptionValue::List(vec!["use_runner_v2".to_string()]))
        );
        assert_eq!(opts.get("save_main_session"), Some(&OptionValue::Bool(true)));
        assert_eq!(
            opts.get("pickle_library"),
            Some(&OptionValue::Str("cloudpickle".into()))
        );
        assert_eq!(
            opts.get("sdk_container_image"),
            Some(&OptionValue::Str("some-container:some-tag".into()))
        );
        assert_eq!(opts.get("job_name"), Some(&OptionValue::Str("job".into())));
        assert_eq!(opts.get("runner"), Some(&OptionValue::Str("DataflowRunner".into())));
        assert_eq!(opts.len(), 11);
    }

    #[test]
    fn build_options_requires_project_and_temp_location_independently() {
        let launcher = RecordingLauncher::new();

        let mut config = DataflowConfig::default();
        config.set_temp_gcs_location("gs://test").unwrap();
        let bakery = DataflowBakery::new(config, launcher.clone());
        let err = bakery
            .build_options(&JobName::new("test"), "test")
            .unwrap_err();
        assert!(matches!(err, BakeryError::MissingField { field: "project_id" }));

        let mut config = DataflowConfig::default();
        config.project_id = Some("something".to_string());
        let bakery = DataflowBakery::new(config, launcher);
        let err = bakery
            .build_options(&JobName::new("test"), "test")
            .unwrap_err();
        assert!(matches!(
            err,
            BakeryError::MissingField {
                field: "temp_gcs_location"
            }
        ));
    }

    #[tokio::test]
    async fn submit_returns_submitted_handle() {
        let launcher = RecordingLauncher::new();
        let bakery = DataflowBakery::new(full_config(), launcher.clone());

        let handle = bakery
            .submit(&recipe(), &JobName::new("job"), "some-container:some-tag")
            .await
            .unwrap();

        assert_eq!(handle.job_id.as_str(), "2024-01-01_job_abc123");
        assert_eq!(handle.job_name.as_str(), "job");
        assert_eq!(launcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_config_never_reaches_the_launcher() {
        let launcher = RecordingLauncher::new();
        let bakery = DataflowBakery::new(DataflowConfig::default(), launcher.clone());

        let err = bakery
            .submit(&recipe(), &JobName::new("job"), "img:tag")
            .await
            .unwrap_err();

        assert!(matches!(err, BakeryError::MissingField { .. }));
        assert_eq!(launcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn launcher_rejection_propagates_as_submission_error() {
        let bakery = DataflowBakery::new(full_config(), Arc::new(RejectingLauncher));

        let err = bakery
            .submit(&recipe(), &JobName::new("job"), "img:tag")
            .await
            .unwrap_err();

        match err {
            BakeryError::Submission(source) => {
                assert!(source.to_string().contains("quota exceeded"));
            }
            other => panic!("expected Submission, got: {other}"),
        }
    }

    #[test]
    fn requirements_describe_dataflow() {
        let bakery = DataflowBakery::new(DataflowConfig::default(), RecordingLauncher::new());
        let req = bakery.describe_requirements();
        assert_eq!(req.runner, "DataflowRunner");
        assert_eq!(req.temp_location_scheme, "gs://");
        assert!(!req.blocking_submission);
    }
}
