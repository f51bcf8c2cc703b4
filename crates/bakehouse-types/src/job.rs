//! Job identity and lifecycle model types.
//!
//! [`JobHandle`] is the sole artifact crossing the submit/track boundary:
//! produced once per submission, immutable, and serialized verbatim as the
//! submission JSON line an external driver prints.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque backend-assigned job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Create a new job identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for JobId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

/// Caller-chosen job name, passed through to the backend verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(String);

impl JobName {
    /// Create a new job name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for JobName {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Submission status carried by a [`JobHandle`].
///
/// A handle only exists for jobs that were accepted by the backend, so the
/// only value is `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    Submitted,
}

/// Identifier pair returned immediately after a successful submission.
///
/// Field order matters: serializing produces the submission JSON line
/// `{"status":"submitted","job_id":...,"job_name":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub status: SubmitStatus,
    pub job_id: JobId,
    pub job_name: JobName,
}

impl JobHandle {
    /// Build a handle for a freshly submitted job.
    #[must_use]
    pub fn submitted(job_id: JobId, job_name: JobName) -> Self {
        Self {
            status: SubmitStatus::Submitted,
            job_id,
            job_name,
        }
    }
}

// ---------------------------------------------------------------------------
// Backend-reported state
// ---------------------------------------------------------------------------

/// Job state as reported by the backend's status query.
///
/// The backend's state vocabulary is open-ended; exactly one string means
/// success (`Done`), exactly one means keep polling (`Running`), and
/// everything else is carried verbatim in `Other` and treated as failure
/// by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    Done,
    Running,
    Other(String),
}

impl JobState {
    /// Borrow the backend's literal state string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Done => "Done",
            Self::Running => "Running",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for JobState {
    fn from(raw: &str) -> Self {
        match raw {
            "Done" => Self::Done,
            "Running" => Self::Running,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for JobState {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<JobState> for String {
    fn from(state: JobState) -> Self {
        state.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_serializes_to_submission_line() {
        let handle = JobHandle::submitted(JobId::new("2024-01-abc"), JobName::new("gpcp-bake"));
        let line = serde_json::to_string(&handle).unwrap();
        assert_eq!(
            line,
            r#"{"status":"submitted","job_id":"2024-01-abc","job_name":"gpcp-bake"}"#
        );
    }

    #[test]
    fn handle_round_trips() {
        let handle = JobHandle::submitted(JobId::new("id-1"), JobName::new("job"));
        let parsed: JobHandle = serde_json::from_str(&serde_json::to_string(&handle).unwrap()).unwrap();
        assert_eq!(parsed, handle);
    }

    #[test]
    fn job_state_maps_known_strings() {
        assert_eq!(JobState::from("Done"), JobState::Done);
        assert_eq!(JobState::from("Running"), JobState::Running);
    }

    #[test]
    fn job_state_keeps_unknown_strings_verbatim() {
        let state = JobState::from("Cancelled");
        assert_eq!(state, JobState::Other("Cancelled".to_string()));
        assert_eq!(state.as_str(), "Cancelled");
    }

    #[test]
    fn job_state_is_case_sensitive() {
        // "done" is not the backend's success token.
        assert_eq!(JobState::from("done"), JobState::Other("done".to_string()));
    }

    #[test]
    fn job_id_displays_inner() {
        let id = JobId::new("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }
}
