//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Default location of the patient data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "patients.json";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `data_file` is empty or points
    /// at an existing directory rather than a file.
    pub fn new(data_file: PathBuf) -> PatientResult<Self> {
        if data_file.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "data_file cannot be empty".into(),
            ));
        }

        if data_file.is_dir() {
            return Err(PatientError::InvalidInput(format!(
                "data_file must be a file path, got directory: {}",
                data_file.display()
            )));
        }

        Ok(Self { data_file })
    }

    /// Path of the JSON file holding the patient collection.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

/// Resolve the data file path from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_FILE`].
pub fn data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}
