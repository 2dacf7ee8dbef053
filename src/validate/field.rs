//! Single-field validators and their composition.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use url::Url;

use super::ValidationResult;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s\-']+$").expect("Invalid name regex"));

/// Longest decimal literal at the start of the input, exponent included.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("Invalid number regex")
});

pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::fail("Email is required");
    }
    if !EMAIL.is_match(email) {
        return ValidationResult::fail("Please enter a valid email address");
    }
    ValidationResult::ok()
}

/// 10 to 15 digits once separators are stripped.
pub fn validate_phone(phone: &str) -> ValidationResult {
    if phone.is_empty() {
        return ValidationResult::fail("Phone number is required");
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(10..=15).contains(&digits) {
        return ValidationResult::fail("Please enter a valid phone number");
    }
    ValidationResult::ok()
}

/// Fails on empty or whitespace-only input.
pub fn validate_required(value: &str, field_name: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail(format!("{field_name} is required"));
    }
    ValidationResult::ok()
}

pub fn validate_min_length(value: &str, min_length: usize, field_name: &str) -> ValidationResult {
    if value.chars().count() < min_length {
        return ValidationResult::fail(format!(
            "{field_name} must be at least {min_length} characters long"
        ));
    }
    ValidationResult::ok()
}

pub fn validate_max_length(value: &str, max_length: usize, field_name: &str) -> ValidationResult {
    if value.chars().count() > max_length {
        return ValidationResult::fail(format!(
            "{field_name} must be no more than {max_length} characters long"
        ));
    }
    ValidationResult::ok()
}

/// Absolute URL as the WHATWG URL parser accepts it.
pub fn validate_url(url: &str) -> ValidationResult {
    if url.is_empty() {
        return ValidationResult::fail("URL is required");
    }
    if Url::parse(url).is_err() {
        return ValidationResult::fail("Please enter a valid URL");
    }
    ValidationResult::ok()
}

/// Letters, spaces, hyphens and apostrophes; at least two characters.
pub fn validate_name(name: &str, field_name: &str) -> ValidationResult {
    if name.is_empty() {
        return ValidationResult::fail(format!("{field_name} is required"));
    }
    if !NAME.is_match(name) {
        return ValidationResult::fail(format!(
            "{field_name} can only contain letters, spaces, hyphens, and apostrophes"
        ));
    }
    if name.chars().count() < 2 {
        return ValidationResult::fail(format!("{field_name} must be at least 2 characters long"));
    }
    ValidationResult::ok()
}

/// Leading number of `value`, ignoring leading whitespace and any trailing
/// text, so `"12px"` reads as 12.
fn parse_leading_number(value: &str) -> Option<f64> {
    let found = LEADING_NUMBER.find(value.trim_start())?;
    found.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Finite number within the optional inclusive bounds.
pub fn validate_number(value: &str, min: Option<f64>, max: Option<f64>, field_name: &str) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::fail(format!("{field_name} is required"));
    }
    let Some(number) = parse_leading_number(value) else {
        return ValidationResult::fail(format!("{field_name} must be a valid number"));
    };
    if let Some(min) = min.filter(|min| number < *min) {
        return ValidationResult::fail(format!("{field_name} must be at least {min}"));
    }
    if let Some(max) = max.filter(|max| number > *max) {
        return ValidationResult::fail(format!("{field_name} must be no more than {max}"));
    }
    ValidationResult::ok()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// `YYYY-MM-DD` or RFC 3339 date within the optional inclusive bounds.
pub fn validate_date(
    value: &str,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
    field_name: &str,
) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::fail(format!("{field_name} is required"));
    }
    let Some(date) = parse_date(value) else {
        return ValidationResult::fail(format!("{field_name} must be a valid date"));
    };
    if let Some(min) = min.filter(|min| date < *min) {
        return ValidationResult::fail(format!("{field_name} must be after {}", min.format("%Y-%m-%d")));
    }
    if let Some(max) = max.filter(|max| date > *max) {
        return ValidationResult::fail(format!("{field_name} must be before {}", max.format("%Y-%m-%d")));
    }
    ValidationResult::ok()
}

/// Metadata of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

/// `allowed` entries starting with `.` match the file extension; others
/// match as a substring of the MIME type.
pub fn validate_file_type(file: Option<&FileInfo>, allowed: &[&str]) -> ValidationResult {
    let Some(file) = file else {
        return ValidationResult::fail("File is required");
    };
    let mime = file.mime_type.to_lowercase();
    let name = file.name.to_lowercase();
    let accepted = allowed.iter().any(|kind| {
        if kind.starts_with('.') {
            name.ends_with(&kind.to_lowercase())
        } else {
            mime.contains(&kind.to_lowercase())
        }
    });
    if !accepted {
        return ValidationResult::fail(format!(
            "File must be one of the following types: {}",
            allowed.join(", ")
        ));
    }
    ValidationResult::ok()
}

pub fn validate_file_size(file: Option<&FileInfo>, max_size_mb: f64) -> ValidationResult {
    let Some(file) = file else {
        return ValidationResult::fail("File is required");
    };
    let max_bytes = max_size_mb * 1024.0 * 1024.0;
    if file.size as f64 > max_bytes {
        return ValidationResult::fail(format!("File size must be less than {max_size_mb}MB"));
    }
    ValidationResult::ok()
}

// =============================================================================
// COMPOSITION
// =============================================================================

/// A check applied to a field's text.
pub type Rule<'a> = Box<dyn Fn(&str) -> ValidationResult + 'a>;

/// First failing message among `results`. Evaluation stops at the failure.
pub fn first_failure(results: impl IntoIterator<Item = ValidationResult>) -> Option<String> {
    results.into_iter().find_map(ValidationResult::into_error)
}

/// Run each field's rules in order, keeping the first failure per field.
pub fn validate_fields<K: Ord + Copy>(fields: &[(K, &str, Vec<Rule<'_>>)]) -> BTreeMap<K, String> {
    fields
        .iter()
        .filter_map(|(key, value, rules)| {
            first_failure(rules.iter().map(|rule| rule(value))).map(|error| (*key, error))
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
