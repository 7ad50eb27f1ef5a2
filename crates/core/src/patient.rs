//! Patient schema, validation, and derived health metrics.
//!
//! This module defines the stored shape of a patient record, the sparse patch
//! used for partial updates, and the two derived metrics (`bmi` and `verdict`)
//! that are recomputed on every access and never persisted.
//!
//! ## Stored vs derived
//!
//! The persisted collection maps patient id to the six stored fields only.
//! [`PatientView`] is the response shape: stored fields plus the derived
//! metrics, materialised at read time. Because the metrics are recomputed on
//! every access, stored-value drift is impossible by construction.

use crate::{PatientError, PatientResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Patient gender, restricted to the three enumerated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Categorical health label derived from a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

/// A patient's stored attributes.
///
/// The patient id is the collection key, not a field of the stored value.
/// Derived metrics are available via [`Patient::bmi`] and [`Patient::verdict`]
/// and are never serialized as part of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    /// Patient name.
    pub name: String,
    /// City the patient lives in.
    pub city: String,
    /// Patient age in years, 1–99 inclusive.
    pub age: u32,
    /// Gender of the patient.
    pub gender: Gender,
    /// Patient height in meters.
    pub height: f64,
    /// Patient weight in kilograms.
    pub weight: f64,
}

impl Patient {
    /// Validates the record against the field constraints.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` naming the offending field if:
    /// - `name` or `city` is empty or whitespace-only,
    /// - `age` is outside 1–99,
    /// - `height` or `weight` is not a positive finite number.
    pub fn validate(&self) -> PatientResult<()> {
        if self.name.trim().is_empty() {
            return Err(PatientError::InvalidInput("name cannot be empty".into()));
        }

        if self.city.trim().is_empty() {
            return Err(PatientError::InvalidInput("city cannot be empty".into()));
        }

        if !(1..=99).contains(&self.age) {
            return Err(PatientError::InvalidInput(format!(
                "age must be between 1 and 99, got {}",
                self.age
            )));
        }

        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(PatientError::InvalidInput(
                "height must be a positive number of meters".into(),
            ));
        }

        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(PatientError::InvalidInput(
                "weight must be a positive number of kilograms".into(),
            ));
        }

        Ok(())
    }

    /// Body mass index, `weight / height²`, rounded to two decimal places.
    pub fn bmi(&self) -> f64 {
        let raw = self.weight / (self.height * self.height);
        (raw * 100.0).round() / 100.0
    }

    /// Categorical health label for this record.
    ///
    /// Thresholds are applied to raw weight, not BMI, even though they look
    /// BMI-shaped. Known quirk of the live behaviour; kept until product
    /// signs off on a change.
    pub fn verdict(&self) -> Verdict {
        if self.weight < 18.5 {
            Verdict::Underweight
        } else if self.weight < 30.0 {
            Verdict::Normal
        } else {
            Verdict::Obese
        }
    }

    /// Materialises the response shape: stored fields plus derived metrics.
    pub fn to_view(&self) -> PatientView {
        PatientView {
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi: self.bmi(),
            verdict: self.verdict(),
        }
    }
}

/// Response shape of a patient record: stored fields plus derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientView {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    /// Derived: `weight / height²` rounded to two decimal places.
    pub bmi: f64,
    /// Derived: categorical health label.
    pub verdict: Verdict,
}

/// Sparse patch for a partial patient update.
///
/// Every field is optional; absent fields leave the stored value unchanged.
/// Apply with [`PatientUpdate::merged`], which re-validates the merged record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// Merges the present fields of this patch onto `existing` and validates
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if the merged record fails
    /// validation. `existing` is left untouched in that case.
    pub fn merged(&self, existing: &Patient) -> PatientResult<Patient> {
        let merged = Patient {
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            city: self.city.clone().unwrap_or_else(|| existing.city.clone()),
            age: self.age.unwrap_or(existing.age),
            gender: self.gender.unwrap_or(existing.gender),
            height: self.height.unwrap_or(existing.height),
            weight: self.weight.unwrap_or(existing.weight),
        };

        merged.validate()?;
        Ok(merged)
    }
}
