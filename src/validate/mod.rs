//! Field-level validators.
//!
//! Pure functions returning [`ValidationResult`]. They never panic; missing
//! input is an explicit "required" failure.
//!
//! - [`field`] - email, phone, length, URL, name, number, date, file checks
//! - [`password`] - strength rubric
//! - [`sanitize`] - HTML escaping of free text

pub mod field;
pub mod password;
pub mod sanitize;

pub use field::{
    first_failure, validate_date, validate_email, validate_fields, validate_file_size,
    validate_file_type, validate_max_length, validate_min_length, validate_name, validate_number,
    validate_phone, validate_required, validate_url, FileInfo, Rule,
};
pub use password::{validate_password, PasswordResult, PasswordStrength, PasswordTraits};
pub use sanitize::sanitize_input;

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }

    /// The error message, if the check failed.
    pub fn into_error(self) -> Option<String> {
        if self.is_valid {
            None
        } else {
            self.error
        }
    }
}
