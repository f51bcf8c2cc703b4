//! `gcloud`-backed adapters: job status queries and the ambient project
//! default.
//!
//! Both shell out to the `gcloud` CLI, which carries its own credentials
//! and configuration; this layer does no auth of its own.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bakehouse_types::{JobId, JobState};
use tokio::process::Command;

use crate::tracker::JobStatusSource;

/// Status source that queries Dataflow through
/// `gcloud dataflow jobs show <id> --format=json`.
#[derive(Debug, Default)]
pub struct GcloudStatusSource;

#[async_trait]
impl JobStatusSource for GcloudStatusSource {
    async fn job_state(&self, job_id: &JobId) -> Result<JobState> {
        let output = Command::new("gcloud")
            .args(["dataflow", "jobs", "show", job_id.as_str(), "--format=json"])
            .output()
            .await
            .context("failed to spawn gcloud")?;

        if !output.status.success() {
            anyhow::bail!(
                "gcloud dataflow jobs show exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        parse_job_state(&output.stdout)
    }
}

/// Parse the `state` field out of a `gcloud dataflow jobs show` JSON body.
fn parse_job_state(raw: &[u8]) -> Result<JobState> {
    let body: serde_json::Value =
        serde_json::from_slice(raw).context("gcloud job description is not valid JSON")?;
    let state = body
        .get("state")
        .and_then(serde_json::Value::as_str)
        .context("gcloud job description has no 'state' field")?;
    Ok(JobState::from(state))
}

/// Read the ambient default GCP project, once.
///
/// Returns `Ok(None)` when no default project is configured; an unset
/// project is not an error here, it surfaces later as a missing required
/// field at options-build time.
///
/// # Errors
///
/// Returns an error if `gcloud` cannot be spawned or exits non-zero.
pub async fn ambient_project() -> Result<Option<String>> {
    let output = Command::new("gcloud")
        .args(["config", "get-value", "project"])
        .output()
        .await
        .context("failed to spawn gcloud")?;

    if !output.status.success() {
        anyhow::bail!(
            "gcloud config get-value project exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let project = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if project.is_empty() || project == "(unset)" {
        Ok(None)
    } else {
        Ok(Some(project))
    }
}
