//! # PHR Core
//!
//! Core business logic for the PHR patient record system.
//!
//! This crate contains pure data operations over the patient collection:
//! - Patient schema, validation, and the derived `bmi`/`verdict` metrics
//! - Whole-file JSON storage of the collection under `PHR_DATA_FILE`
//! - Lookup and metric-based sorting over the collection
//!
//! **No API concerns**: HTTP servers, routing, and status-code mapping belong
//! in `api-rest`.

pub mod config;
pub mod error;
pub mod patient;
pub mod query;
pub mod store;

pub use config::CoreConfig;
pub use error::{PatientError, PatientResult};
pub use patient::{Gender, Patient, PatientUpdate, PatientView, Verdict};
pub use query::{lookup, sort_by_metric, SortKey, SortOrder};
pub use store::{PatientCollection, PatientStore};
