//! Job tracking: poll a submitted job to a terminal outcome.
//!
//! One logical thread of control per tracking session, sleeping between
//! status queries. The wait policy is asymmetric on purpose: completion
//! latency for this class of job is bimodal (normal jobs finish near a
//! known average, hung jobs never finish), so the tracker waits a long
//! initial grace period before the first query, rechecks on a short
//! interval, and imposes its own hard ceiling at roughly double the
//! expected duration rather than trusting the backend's view of
//! liveness. Some failure modes manifest as jobs that report `Running`
//! forever.

use std::time::Duration;

use async_trait::async_trait;
use bakehouse_types::{JobHandle, JobId, JobState};
use tokio::time::Instant;

use crate::error::TrackError;

/// Status query seam to the backend.
///
/// Read-only: implementations answer "what state does the backend report
/// for this job id right now" and nothing else.
///
/// Implementations must be `Send + Sync` for use behind `Arc<dyn JobStatusSource>`.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    /// Query the backend-reported state for a job.
    ///
    /// # Errors
    ///
    /// Returns an error when the query itself fails (transport, parse);
    /// such an error says nothing about the job's state.
    async fn job_state(&self, job_id: &JobId) -> anyhow::Result<JobState>;
}

/// Wait policy for a tracking session.
///
/// The defaults preserve the empirical shape for Dataflow bake jobs:
/// ~6 minutes typical completion, so a 5 minute grace period before the
/// first query, 30 second rechecks, and a 12 minute ceiling that cleanly
/// separates "a bit slow" from "hung".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Wait before the first status query. Polling earlier than the
    /// typical completion time wastes backend-query quota.
    pub initial_grace: Duration,
    /// Wait between consecutive status queries while the job is running.
    pub poll_interval: Duration,
    /// Hard elapsed-time ceiling; crossing it is a terminal timeout even
    /// if the backend last reported `Running`.
    pub ceiling: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            initial_grace: Duration::from_secs(5 * 60),
            poll_interval: Duration::from_secs(30),
            ceiling: Duration::from_secs(12 * 60),
        }
    }
}

/// Terminal success of a tracking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOutcome {
    pub job_id: JobId,
    pub elapsed: Duration,
}

/// Transient per-invocation tracking state. Never shared, never persisted.
struct TrackingSession {
    job_id: JobId,
    started: Instant,
}

impl TrackingSession {
    fn begin(job_id: JobId) -> Self {
        Self {
            job_id,
            started: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Track a submitted job to a terminal outcome.
///
/// Blocks (with sleeps) until the job reaches `Done`, reports any state
/// other than `Done`/`Running`, or crosses the elapsed-time ceiling.
/// There is no in-band cancellation: abandoning the future leaves the
/// remote job running.
///
/// # Errors
///
/// - [`TrackError::Failed`] when the backend reports a terminal
///   non-success state (carried verbatim).
/// - [`TrackError::Timeout`] when elapsed time exceeds the ceiling; the
///   remote job may still be running and is the operator's to inspect.
/// - [`TrackError::Status`] when a status query itself fails.
pub async fn track(
    source: &dyn JobStatusSource,
    handle: &JobHandle,
    config: &TrackerConfig,
) -> Result<TrackOutcome, TrackError> {
    let session = TrackingSession::begin(handle.job_id.clone());
    let mut last_state = "unknown".to_string();

    tracing::info!(
        job_id = %session.job_id,
        grace_secs = config.initial_grace.as_secs(),
        ceiling_secs = config.ceiling.as_secs(),
        "Tracking job"
    );
    tokio::time::sleep(config.initial_grace).await;

    loop {
        let elapsed = session.elapsed();
        if elapsed > config.ceiling {
            tracing::warn!(
                job_id = %session.job_id,
                elapsed_secs = elapsed.as_secs(),
                last_state,
                "Tracking ceiling exceeded; job may still be running remotely"
            );
            return Err(TrackError::Timeout {
                job_id: session.job_id,
                elapsed,
                last_state,
            });
        }

        let state = source
            .job_state(&session.job_id)
            .await
            .map_err(TrackError::Status)?;
        tracing::debug!(
            job_id = %session.job_id,
            state = %state,
            elapsed_secs = elapsed.as_secs(),
            "Polled job state"
        );

        match state {
            JobState::Done => {
                let elapsed = session.elapsed();
                tracing::info!(
                    job_id = %session.job_id,
                    elapsed_secs = elapsed.as_secs(),
                    "Job succeeded"
                );
                return Ok(TrackOutcome {
                    job_id: session.job_id,
                    elapsed,
                });
            }
            JobState::Running => {
                last_state = state.as_str().to_string();
                tokio::time::sleep(config.poll_interval).await;
            }
            JobState::Other(reported) => {
                // Fail fast: an unrecognized or explicit-error state is
                // never retried.
                tracing::error!(
                    job_id = %session.job_id,
                    state = %reported,
                    elapsed_secs = elapsed.as_secs(),
                    "Job reported terminal non-success state"
                );
                return Err(TrackError::Failed {
                    job_id: session.job_id,
                    state: reported,
                    elapsed,
                });
            }
        }
    }
}
