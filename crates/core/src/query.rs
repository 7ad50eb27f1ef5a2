//! Lookup and sorting over the patient collection.

use crate::error::{PatientError, PatientResult};
use crate::patient::{Patient, PatientView};
use crate::store::PatientCollection;
use std::str::FromStr;

/// Metric a collection can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Height,
    Weight,
    Bmi,
}

impl SortKey {
    fn value(self, patient: &Patient) -> f64 {
        match self {
            SortKey::Height => patient.height,
            SortKey::Weight => patient.weight,
            SortKey::Bmi => patient.bmi(),
        }
    }
}

impl FromStr for SortKey {
    type Err = PatientError;

    fn from_str(s: &str) -> PatientResult<Self> {
        match s {
            "height" => Ok(SortKey::Height),
            "weight" => Ok(SortKey::Weight),
            "bmi" => Ok(SortKey::Bmi),
            other => Err(PatientError::InvalidSortField(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = PatientError;

    fn from_str(s: &str) -> PatientResult<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(PatientError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Returns the record for an exact id match.
///
/// # Errors
///
/// Returns `PatientError::NotFound` when the id is absent.
pub fn lookup<'a>(collection: &'a PatientCollection, patient_id: &str) -> PatientResult<&'a Patient> {
    collection.get(patient_id).ok_or(PatientError::NotFound)
}

/// Sorts the collection's records by the requested metric.
///
/// The sort is stable, with records visited in id order, so equal metric
/// values tie-break on patient id. Descending order reverses the comparator
/// rather than the sorted output, which preserves that tie-break order.
pub fn sort_by_metric(
    collection: &PatientCollection,
    key: SortKey,
    order: SortOrder,
) -> Vec<PatientView> {
    let mut records: Vec<&Patient> = collection.values().collect();

    records.sort_by(|a, b| {
        let (a, b) = match order {
            SortOrder::Asc => (a, b),
            SortOrder::Desc => (b, a),
        };
        key.value(a).total_cmp(&key.value(b))
    });

    records.into_iter().map(Patient::to_view).collect()
}
