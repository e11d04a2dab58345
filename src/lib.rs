mod align;
mod catalog;
mod consts;
mod extract;
mod format;
mod prelude;
mod semantic;

pub use align::AlignmentError;
pub use catalog::{FieldKind, is_protected, kinds_by_discriminator};
pub use consts::*;
pub use extract::{ExtractedFields, MeridiemReading};
pub use format::{FormatError, FormatSpec, FormatToken};
pub use semantic::{SemanticError, is_leap_year};

use crate::prelude::*;
use serde::Serialize;

/// Result of checking one date string against a compiled mask.
/// Every call ends in exactly one of these; there is no partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum ValidationOutcome {
    /// The date string matches the mask and every field is in range
    #[display(fmt = "valid")]
    Valid,
    /// The date string failed, for the contained reason
    #[display(fmt = "invalid: {_0}")]
    Invalid(ValidationError),
}

/// Why a date string failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum ValidationError {
    /// The date could not be laid over the mask's separator structure.
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
    /// A field value failed its calendar or time-of-day range check.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl ValidationOutcome {
    /// Returns true if the date string validated
    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure reason, if any
    pub const fn error(&self) -> Option<ValidationError> {
        match *self {
            Self::Valid => None,
            Self::Invalid(error) => Some(error),
        }
    }
}

/// Compiles a format mask into an immutable [`FormatSpec`].
///
/// Compile once per distinct (mask, mode) pair and reuse the spec for any
/// number of validation calls.
///
/// # Errors
/// Returns a [`FormatError`] if the mask violates any legality rule.
pub fn compile_format(raw_format: &str, twelve_hour: bool) -> Result<FormatSpec, FormatError> {
    FormatSpec::compile(raw_format, twelve_hour)
}

/// Validates a date string against a compiled mask, stopping at the first
/// failure. A failed call never poisons the spec for later calls.
pub fn validate(date: &str, spec: &FormatSpec) -> ValidationOutcome {
    match try_validate(date, spec) {
        Ok(()) => ValidationOutcome::Valid,
        Err(error) => ValidationOutcome::Invalid(error),
    }
}

fn try_validate(date: &str, spec: &FormatSpec) -> Result<(), ValidationError> {
    let parts = align::split_segments(spec, date)?;
    let fields = extract::extract(spec, &parts);
    semantic::check(&fields, spec.twelve_hour())?;
    Ok(())
}

/// Collects every range failure of a date string, for callers that want a
/// full report rather than the first failure. An alignment failure still
/// ends the walk early: without aligned segments there are no field values
/// to range-check.
///
/// # Errors
/// Returns the [`AlignmentError`] if the date cannot be laid over the mask.
pub fn validate_all(date: &str, spec: &FormatSpec) -> Result<Vec<SemanticError>, AlignmentError> {
    let parts = align::split_segments(spec, date)?;
    let fields = extract::extract(spec, &parts);
    Ok(semantic::check_all(&fields, spec.twelve_hour()))
}

/// Extracts the raw value of every field the mask declares, without running
/// the range checks. The returned map borrows from `date`.
///
/// # Errors
/// Returns the [`AlignmentError`] if the date cannot be laid over the mask.
pub fn extract_fields<'a>(
    date: &'a str,
    spec: &FormatSpec,
) -> Result<ExtractedFields<'a>, AlignmentError> {
    let parts = align::split_segments(spec, date)?;
    Ok(extract::extract(spec, &parts))
}

impl FormatSpec {
    /// Method form of [`validate`]
    pub fn validate(&self, date: &str) -> ValidationOutcome {
        validate(date, self)
    }

    /// Method form of [`validate_all`]
    ///
    /// # Errors
    /// Returns the [`AlignmentError`] if the date cannot be laid over the mask.
    pub fn validate_all(&self, date: &str) -> Result<Vec<SemanticError>, AlignmentError> {
        validate_all(date, self)
    }

    /// Method form of [`extract_fields`]
    ///
    /// # Errors
    /// Returns the [`AlignmentError`] if the date cannot be laid over the mask.
    pub fn extract<'a>(&self, date: &'a str) -> Result<ExtractedFields<'a>, AlignmentError> {
        extract_fields(date, self)
    }
}
