//! Password strength rubric.
//!
//! Five traits, one point each: lowercase, uppercase, digit, symbol, and a
//! length of at least 12. Four or more points is strong, two or three is
//! medium. Fewer than two points fails validation.

use serde::Serialize;

/// Minimum length before any scoring.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Length that earns the length point.
pub const LONG_PASSWORD_LENGTH: usize = 12;

const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

bitflags::bitflags! {
    /// Rubric traits present in a password.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PasswordTraits: u8 {
        const LOWERCASE = 1 << 0;
        const UPPERCASE = 1 << 1;
        const DIGIT = 1 << 2;
        const SYMBOL = 1 << 3;
        const LENGTH = 1 << 4;
    }
}

impl PasswordTraits {
    pub fn of(password: &str) -> Self {
        let mut traits = Self::empty();
        for c in password.chars() {
            if c.is_ascii_lowercase() {
                traits |= Self::LOWERCASE;
            } else if c.is_ascii_uppercase() {
                traits |= Self::UPPERCASE;
            } else if c.is_ascii_digit() {
                traits |= Self::DIGIT;
            } else if SYMBOLS.contains(c) {
                traits |= Self::SYMBOL;
            }
        }
        if password.chars().count() >= LONG_PASSWORD_LENGTH {
            traits |= Self::LENGTH;
        }
        traits
    }

    pub fn score(self) -> u32 {
        self.bits().count_ones()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    #[default]
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn from_score(score: u32) -> Self {
        if score >= 4 {
            Self::Strong
        } else if score >= 2 {
            Self::Medium
        } else {
            Self::Weak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResult {
    pub is_valid: bool,
    pub error: Option<String>,
    pub strength: PasswordStrength,
}

impl PasswordResult {
    fn fail(error: &str, strength: PasswordStrength) -> Self {
        Self {
            is_valid: false,
            error: Some(error.to_string()),
            strength,
        }
    }
}

pub fn validate_password(password: &str) -> PasswordResult {
    if password.is_empty() {
        return PasswordResult::fail("Password is required", PasswordStrength::Weak);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return PasswordResult::fail(
            "Password must be at least 8 characters long",
            PasswordStrength::Weak,
        );
    }

    let score = PasswordTraits::of(password).score();
    let strength = PasswordStrength::from_score(score);
    if score < 2 {
        return PasswordResult::fail(
            "Password must contain at least 2 of the following: lowercase letters, uppercase letters, numbers, special characters",
            strength,
        );
    }

    PasswordResult {
        is_valid: true,
        error: None,
        strength,
    }
}
