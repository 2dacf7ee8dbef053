//! Core types for folio-core.
//!
//! Preference enums, the user record and the application state owned by the
//! [`PreferenceStore`](crate::state::store::PreferenceStore).

use serde::{Deserialize, Serialize};

// =============================================================================
// THEME
// =============================================================================

/// Theme preference selected by the user.
///
/// `System` defers to the OS color-scheme signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Next mode in the toggle cycle: light → dark → system → light.
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    /// Resolve to the rendered scheme given the OS dark-mode report.
    pub fn resolve(self, os_prefers_dark: bool) -> ColorScheme {
        match self {
            Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
            Self::System => ColorScheme::from_dark(os_prefers_dark),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

/// The effective, rendered color scheme. Exactly one of light or dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Class name applied to the document root by the presentation layer.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

// =============================================================================
// LANGUAGE
// =============================================================================

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    /// The other language (en ⇄ pt).
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Pt,
            Self::Pt => Self::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
        }
    }
}

// =============================================================================
// USER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

/// Per-user preferences. `theme`/`language` mirror the top-level state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub theme: ThemeMode,
    pub language: Language,
    pub animations: bool,
    pub notifications: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            language: Language::default(),
            animations: true,
            notifications: true,
        }
    }
}

/// Partial update merged into [`UserPreferences`]. `None` fields are left as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreferencesPatch {
    pub theme: Option<ThemeMode>,
    pub language: Option<Language>,
    pub animations: Option<bool>,
    pub notifications: Option<bool>,
}

impl PreferencesPatch {
    pub fn apply(&self, prefs: &mut UserPreferences) {
        if let Some(theme) = self.theme {
            prefs.theme = theme;
        }
        if let Some(language) = self.language {
            prefs.language = language;
        }
        if let Some(animations) = self.animations {
            prefs.animations = animations;
        }
        if let Some(notifications) = self.notifications {
            prefs.notifications = notifications;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub preferences: UserPreferences,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Global application state. Mutated only through [`Action`](crate::state::action::Action)s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub theme: ThemeMode,
    pub language: Language,
    pub is_loading: bool,
    pub error: Option<String>,
    pub user: Option<User>,
}

impl AppState {
    /// Initial state with the given preference defaults.
    pub fn with_defaults(theme: ThemeMode, language: Language) -> Self {
        Self {
            theme,
            language,
            ..Self::default()
        }
    }

    /// Snapshot of the fields that survive a reload.
    pub fn preferences_snapshot(&self) -> PersistedPreferences {
        let prefs = self.user.as_ref().map(|u| &u.preferences);
        PersistedPreferences {
            theme: Some(self.theme),
            language: Some(self.language),
            animations: Some(prefs.map(|p| p.animations).unwrap_or(true)),
            notifications: Some(prefs.map(|p| p.notifications).unwrap_or(true)),
        }
    }
}

/// Serialized preference blob kept in device storage.
///
/// All fields are optional on read so a partially written or older blob still
/// loads; field order is fixed so the serialized form is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
}

// =============================================================================
// TESTS
// =============================================================================
