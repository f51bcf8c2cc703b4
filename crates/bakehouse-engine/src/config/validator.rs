//! Validation entry points for Dataflow configuration.
//!
//! Two deliberately distinct checks: [`validate_temp_location`] runs at
//! assignment time (format is knowable the moment a value is written),
//! [`validate_required`] runs at options-build time (required fields may
//! be set in any order, so completeness can only be judged when options
//! are built). Both fail before any remote resource is created.

use crate::config::types::{DataflowConfig, TEMP_LOCATION_SCHEME};
use crate::error::BakeryError;

/// Check that a temp storage location carries the `gs://` scheme.
///
/// # Errors
///
/// Returns [`BakeryError::TempLocationFormat`] naming the offending value.
pub fn validate_temp_location(value: &str) -> Result<(), BakeryError> {
    if value.starts_with(TEMP_LOCATION_SCHEME) {
        Ok(())
    } else {
        Err(BakeryError::TempLocationFormat {
            value: value.to_string(),
            scheme: TEMP_LOCATION_SCHEME,
        })
    }
}

/// Check that every field required for option building is present.
///
/// Reports one missing field per call and re-checks all of them on every
/// call: a caller who fixes `project_id` and retries is told about
/// `temp_gcs_location` next, never silently passed.
///
/// # Errors
///
/// Returns [`BakeryError::MissingField`] for the first absent field.
pub fn validate_required(config: &DataflowConfig) -> Result<(), BakeryError> {
    if config.project_id.is_none() {
        return Err(BakeryError::MissingField { field: "project_id" });
    }
    if config.temp_gcs_location().is_none() {
        return Err(BakeryError::MissingField {
            field: "temp_gcs_location",
        });
    }
    Ok(())
}
