//! Dataflow backend configuration.

use crate::config::validator;
use crate::error::BakeryError;

/// Required URI scheme for Dataflow temp storage.
pub const TEMP_LOCATION_SCHEME: &str = "gs://";

/// Mutable configuration for the Dataflow backend.
///
/// Owned by its bakery for the bakery's whole lifetime and mutated in
/// place by its single owner between submissions; no internal
/// synchronization (concurrent mutation is out of contract).
///
/// `temp_gcs_location` is deliberately not a public field: writes go
/// through [`set_temp_gcs_location`](Self::set_temp_gcs_location), which
/// rejects values outside the `gs://` scheme at assignment time and
/// leaves the previous value untouched on rejection. Completeness of
/// required fields is checked later, at options-build time, because
/// required fields may be set in any order.
#[derive(Debug, Clone)]
pub struct DataflowConfig {
    /// GCP project the job runs under. Required at options-build time.
    pub project_id: Option<String>,
    /// Region to run the job in.
    pub region: String,
    /// Worker machine type.
    pub machine_type: String,
    /// Whether workers get public IPs. Off by default; jobs sourcing from
    /// within GCS don't need them.
    pub use_public_ips: bool,
    temp_gcs_location: Option<String>,
}

impl Default for DataflowConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            region: "us-central1".to_string(),
            machine_type: "n1-highmem-2".to_string(),
            use_public_ips: false,
            temp_gcs_location: None,
        }
    }
}

impl DataflowConfig {
    /// Set the temp storage location, rejecting non-`gs://` values.
    ///
    /// # Errors
    ///
    /// Returns [`BakeryError::TempLocationFormat`] if the value does not
    /// start with `gs://`; the stored value is left unchanged.
    pub fn set_temp_gcs_location(&mut self, value: impl Into<String>) -> Result<(), BakeryError> {
        let value = value.into();
        validator::validate_temp_location(&value)?;
        self.temp_gcs_location = Some(value);
        Ok(())
    }

    /// Unset the temp storage location.
    pub fn clear_temp_gcs_location(&mut self) {
        self.temp_gcs_location = None;
    }

    /// The temp storage location, if set.
    #[must_use]
    pub fn temp_gcs_location(&self) -> Option<&str> {
        self.temp_gcs_location.as_deref()
    }
}
