//! Preference actions and the pure transition function.
//!
//! `reduce` is the only place [`AppState`] changes. It never fails: every
//! input is a closed enum or a plain value.

use crate::types::{AppState, Language, PreferencesPatch, ThemeMode, User};

/// The closed set of state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetTheme(ThemeMode),
    SetLanguage(Language),
    SetLoading(bool),
    /// Setting an error also clears `is_loading`.
    SetError(Option<String>),
    /// A signed-in user's theme and language become the active ones.
    SetUser(Option<User>),
    /// Merged into `user.preferences`; ignored when no user is set.
    /// Theme and language in the patch also update the top-level fields.
    UpdateUserPreferences(PreferencesPatch),
    /// Back to the initial state the store was created with.
    ResetState,
}

impl Action {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetTheme(_) => "SET_THEME",
            Self::SetLanguage(_) => "SET_LANGUAGE",
            Self::SetLoading(_) => "SET_LOADING",
            Self::SetError(_) => "SET_ERROR",
            Self::SetUser(_) => "SET_USER",
            Self::UpdateUserPreferences(_) => "UPDATE_USER_PREFERENCES",
            Self::ResetState => "RESET_STATE",
        }
    }
}

/// Apply `action` to `state`. `initial` is the target of `ResetState`.
pub fn reduce(state: &AppState, action: Action, initial: &AppState) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SetTheme(theme) => {
            next.theme = theme;
            if let Some(user) = next.user.as_mut() {
                user.preferences.theme = theme;
            }
        }
        Action::SetLanguage(language) => {
            next.language = language;
            if let Some(user) = next.user.as_mut() {
                user.preferences.language = language;
            }
        }
        Action::SetLoading(loading) => {
            next.is_loading = loading;
        }
        Action::SetError(error) => {
            next.error = error;
            next.is_loading = false;
        }
        Action::SetUser(user) => {
            if let Some(user) = user.as_ref() {
                next.theme = user.preferences.theme;
                next.language = user.preferences.language;
            }
            next.user = user;
        }
        Action::UpdateUserPreferences(patch) => {
            if let Some(user) = next.user.as_mut() {
                patch.apply(&mut user.preferences);
                next.theme = user.preferences.theme;
                next.language = user.preferences.language;
            }
        }
        Action::ResetState => {
            next = initial.clone();
        }
    }
    next
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{UserPreferences, UserRole};
    use proptest::prelude::*;

    fn user() -> User {
        User {
            id: "1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: UserRole::User,
            preferences: UserPreferences::default(),
        }
    }

    fn with_user() -> AppState {
        AppState {
            user: Some(user()),
            ..AppState::default()
        }
    }

    #[test]
    fn test_set_theme_cascades_to_user() {
        let initial = AppState::default();
        let next = reduce(&with_user(), Action::SetTheme(ThemeMode::Dark), &initial);
        assert_eq!(next.theme, ThemeMode::Dark);
        assert_eq!(next.user.unwrap().preferences.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_set_language_cascades_to_user() {
        let initial = AppState::default();
        let next = reduce(&with_user(), Action::SetLanguage(Language::Pt), &initial);
        assert_eq!(next.language, Language::Pt);
        assert_eq!(next.user.unwrap().preferences.language, Language::Pt);
    }

    #[test]
    fn test_set_theme_without_user() {
        let initial = AppState::default();
        let next = reduce(&initial, Action::SetTheme(ThemeMode::Light), &initial);
        assert_eq!(next.theme, ThemeMode::Light);
        assert!(next.user.is_none());
    }

    #[test]
    fn test_set_error_clears_loading() {
        let initial = AppState::default();
        let loading = reduce(&initial, Action::SetLoading(true), &initial);
        assert!(loading.is_loading);

        let failed = reduce(&loading, Action::SetError(Some("boom".to_string())), &initial);
        assert!(!failed.is_loading);
        assert_eq!(failed.error.as_deref(), Some("boom"));

        let cleared = reduce(&failed, Action::SetError(None), &initial);
        assert!(cleared.error.is_none());
    }

    #[test]
    fn test_update_preferences_without_user_is_noop() {
        let initial = AppState::default();
        let patch = PreferencesPatch {
            animations: Some(false),
            ..Default::default()
        };
        let next = reduce(&initial, Action::UpdateUserPreferences(patch), &initial);
        assert_eq!(next, initial);
    }

    #[test]
    fn test_update_preferences_merges() {
        let initial = AppState::default();
        let patch = PreferencesPatch {
            notifications: Some(false),
            ..Default::default()
        };
        let next = reduce(&with_user(), Action::UpdateUserPreferences(patch), &initial);
        let prefs = next.user.unwrap().preferences;
        assert!(!prefs.notifications);
        assert!(prefs.animations);
    }

    #[test]
    fn test_set_user_adopts_user_preferences() {
        let initial = AppState::default();
        let mut signed_in = user();
        signed_in.preferences.theme = ThemeMode::Dark;
        signed_in.preferences.language = Language::Pt;

        let next = reduce(&initial, Action::SetUser(Some(signed_in)), &initial);
        assert_eq!(next.theme, ThemeMode::Dark);
        assert_eq!(next.language, Language::Pt);

        let signed_out = reduce(&next, Action::SetUser(None), &initial);
        assert!(signed_out.user.is_none());
        assert_eq!(signed_out.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_update_preferences_theme_moves_top_level() {
        let initial = AppState::default();
        let patch = PreferencesPatch {
            theme: Some(ThemeMode::Light),
            ..Default::default()
        };
        let next = reduce(&with_user(), Action::UpdateUserPreferences(patch), &initial);
        assert_eq!(next.theme, ThemeMode::Light);
    }

    #[test]
    fn test_reset_state() {
        let initial = AppState::with_defaults(ThemeMode::Light, Language::Pt);
        let dirty = reduce(&with_user(), Action::SetLoading(true), &initial);
        assert_eq!(reduce(&dirty, Action::ResetState, &initial), initial);
    }

    fn theme_strategy() -> impl Strategy<Value = ThemeMode> {
        prop_oneof![
            Just(ThemeMode::Light),
            Just(ThemeMode::Dark),
            Just(ThemeMode::System)
        ]
    }

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop_oneof![
            theme_strategy().prop_map(Action::SetTheme),
            any::<bool>().prop_map(|pt| Action::SetLanguage(if pt { Language::Pt } else { Language::En })),
            any::<bool>().prop_map(Action::SetLoading),
        ]
    }

    proptest! {
        #[test]
        fn test_user_preferences_never_drift(actions in proptest::collection::vec(action_strategy(), 0..40)) {
            let initial = AppState::default();
            let mut state = with_user();
            for action in actions {
                state = reduce(&state, action, &initial);
                let prefs = &state.user.as_ref().unwrap().preferences;
                prop_assert_eq!(prefs.theme, state.theme);
                prop_assert_eq!(prefs.language, state.language);
            }
        }
    }
}
