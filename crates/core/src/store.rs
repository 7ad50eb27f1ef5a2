//! Whole-file storage of the patient collection.
//!
//! The collection is persisted as a single JSON object keyed by patient id;
//! each value holds the six stored fields. Derived metrics never appear in
//! the on-disk representation.
//!
//! Every caller performs its own independent load-modify-save cycle against
//! the shared file. There is no locking and no cache across requests, so
//! concurrent writers can lose updates to each other. That is an accepted
//! limitation of this service.

use crate::config::CoreConfig;
use crate::error::{PatientError, PatientResult};
use crate::patient::Patient;
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

/// The full set of records, keyed by patient id.
///
/// Key uniqueness of the map enforces id uniqueness in the collection.
pub type PatientCollection = BTreeMap<String, Patient>;

/// Service for loading and saving the persisted patient collection.
///
/// Holds only configuration; no collection state is cached between calls.
#[derive(Clone, Debug)]
pub struct PatientStore {
    cfg: Arc<CoreConfig>,
}

impl PatientStore {
    /// Creates a new store over the configured data file.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Creates the data file with an empty collection if it does not exist.
    ///
    /// Intended to be called once at startup so a fresh deployment starts
    /// from `{}` rather than failing every request.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::FileWrite` if the file cannot be created.
    pub fn bootstrap(&self) -> PatientResult<()> {
        if self.cfg.data_file().exists() {
            return Ok(());
        }
        self.save(&PatientCollection::new())
    }

    /// Reads and parses the entire persisted collection.
    ///
    /// # Errors
    ///
    /// * `PatientError::FileRead` - if the data file is missing or unreadable
    /// * `PatientError::Deserialization` - if the file is not a well-formed
    ///   collection object
    pub fn load(&self) -> PatientResult<PatientCollection> {
        let contents = fs::read_to_string(self.cfg.data_file()).map_err(PatientError::FileRead)?;
        serde_json::from_str(&contents).map_err(PatientError::Deserialization)
    }

    /// Serializes the entire collection and replaces the persisted file.
    ///
    /// Writes to a sibling temp file first and renames it into place, so the
    /// stored collection is never observable in a partially-written state.
    ///
    /// # Errors
    ///
    /// * `PatientError::Serialization` - if the collection cannot be encoded
    /// * `PatientError::FileWrite` - if the temp write or rename fails
    pub fn save(&self, collection: &PatientCollection) -> PatientResult<()> {
        let encoded = serde_json::to_string(collection).map_err(PatientError::Serialization)?;

        let data_file = self.cfg.data_file();
        let mut tmp_file = data_file.as_os_str().to_os_string();
        tmp_file.push(".tmp");
        let tmp_path = std::path::PathBuf::from(tmp_file);

        fs::write(&tmp_path, encoded).map_err(PatientError::FileWrite)?;
        fs::rename(&tmp_path, data_file).map_err(PatientError::FileWrite)
    }
}
