//! Bakery and tracker error model.
//!
//! Two families, matching where they surface in a caller's workflow:
//! [`BakeryError`] covers everything up to and including submission
//! (format checks at assignment time, completeness checks at build time,
//! backend rejection at submit time); [`TrackError`] covers the polling
//! phase. Nothing in this layer retries automatically — retrying a
//! submission risks duplicate remote jobs and is the caller's explicit
//! decision.

use std::time::Duration;

use bakehouse_types::JobId;

/// Errors from configuration, option building, and submission.
#[derive(Debug, thiserror::Error)]
pub enum BakeryError {
    /// A field value failed a structural check at assignment time.
    #[error("temp storage location '{value}' must start with '{scheme}'")]
    TempLocationFormat {
        value: String,
        scheme: &'static str,
    },

    /// A required field was absent at options-build time. One field per
    /// call; both are re-checked on every call.
    #[error("required field '{field}' is not set")]
    MissingField { field: &'static str },

    /// The backend rejected or failed to accept the job. Propagated
    /// verbatim; never retried here.
    #[error("job submission failed: {0}")]
    Submission(#[source] anyhow::Error),
}

/// Terminal errors from a tracking session.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// The backend reported a terminal non-success state.
    #[error("job {job_id} reported state '{state}' after {}s", elapsed.as_secs())]
    Failed {
        job_id: JobId,
        state: String,
        elapsed: Duration,
    },

    /// Elapsed time exceeded the tracking ceiling before the backend
    /// reached a terminal state. Distinct from `Failed`: the remote job
    /// may still be running and consuming resources.
    #[error("job {job_id} exceeded the tracking ceiling after {}s (last state: {last_state})", elapsed.as_secs())]
    Timeout {
        job_id: JobId,
        elapsed: Duration,
        last_state: String,
    },

    /// The status query itself failed; says nothing about the job.
    #[error("status query failed: {0}")]
    Status(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_location_format_names_offending_value() {
        let err = BakeryError::TempLocationFormat {
            value: "This Should be an Error".to_string(),
            scheme: "gs://",
        };
        let msg = err.to_string();
        assert!(msg.contains("This Should be an Error"), "got: {msg}");
        assert!(msg.contains("gs://"), "got: {msg}");
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = BakeryError::MissingField { field: "project_id" };
        assert_eq!(err.to_string(), "required field 'project_id' is not set");
    }

    #[test]
    fn failed_carries_literal_state_and_elapsed() {
        let err = TrackError::Failed {
            job_id: JobId::new("j-1"),
            state: "Cancelled".to_string(),
            elapsed: Duration::from_secs(330),
        };
        let msg = err.to_string();
        assert!(msg.contains("j-1"), "got: {msg}");
        assert!(msg.contains("Cancelled"), "got: {msg}");
        assert!(msg.contains("330"), "got: {msg}");
    }

    #[test]
    fn timeout_is_distinct_from_failure() {
        let err = TrackError::Timeout {
            job_id: JobId::new("j-2"),
            elapsed: Duration::from_secs(750),
            last_state: "Running".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ceiling"), "got: {msg}");
        assert!(msg.contains("Running"), "got: {msg}");
    }
}
