//! Preference Store - global theme/language state
//!
//! Holds [`AppState`] in a reactive signal and exposes action dispatchers and
//! derived accessors. Beside the state it maintains:
//! - the effective color-scheme marker (exactly one of light/dark) consumed
//!   by the presentation layer
//! - a subscription to the OS color-scheme signal while the theme is `system`
//! - a persistence effect that runs the [`PreferenceBridge`] on every settle
//!
//! Stores are plain values, so tests can build as many as they like.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use folio_core::{FolioConfig, PreferenceStore};
//! use folio_core::platform::{ManualMedia, MemoryStorage};
//!
//! let prefers_dark = ManualMedia::new(true);
//! let store = PreferenceStore::new(
//!     &FolioConfig::default(),
//!     Rc::new(MemoryStorage::new()),
//!     Rc::new(prefers_dark.clone()),
//! );
//!
//! assert!(store.is_dark());    // system theme, OS reports dark
//! store.toggle_theme();        // system → light
//! assert!(!store.is_dark());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use super::action::{reduce, Action};
use super::bridge::PreferenceBridge;
use crate::config::FolioConfig;
use crate::platform::media::{MediaSignal, Unsubscribe};
use crate::platform::storage::KeyValueStorage;
use crate::types::{AppState, ColorScheme, Language, PreferencesPatch, ThemeMode, User, UserRole};

pub struct PreferenceStore {
    state: Signal<AppState>,
    initial: AppState,
    scheme: Signal<ColorScheme>,
    prefers_dark: Rc<dyn MediaSignal>,
    system_subscription: RefCell<Option<Unsubscribe>>,
    bridge: Option<Rc<PreferenceBridge>>,
    stop_persist: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl PreferenceStore {
    /// Create a store backed by `storage`.
    ///
    /// Stored theme/language replace the configured defaults once; from then
    /// on every settled change is written back when the projection differs.
    pub fn new(
        config: &FolioConfig,
        storage: Rc<dyn KeyValueStorage>,
        prefers_dark: Rc<dyn MediaSignal>,
    ) -> Self {
        let bridge = Rc::new(PreferenceBridge::new(storage, config.storage_key.clone()));
        let store = Self::build(config, prefers_dark, Some(bridge.clone()));

        if let Some(stored) = bridge.load() {
            let current = store.state.get();
            if let Some(theme) = stored.theme.filter(|t| *t != current.theme) {
                store.dispatch(Action::SetTheme(theme));
            }
            if let Some(language) = stored.language.filter(|l| *l != current.language) {
                store.dispatch(Action::SetLanguage(language));
            }
        }

        let state = store.state.clone();
        let persist = bridge;
        let stop = effect(move || {
            let snapshot = state.get();
            persist.sync(&snapshot);
        });
        *store.stop_persist.borrow_mut() = Some(Box::new(stop));

        store
    }

    /// Create a store with no persistence.
    pub fn in_memory(config: &FolioConfig, prefers_dark: Rc<dyn MediaSignal>) -> Self {
        Self::build(config, prefers_dark, None)
    }

    fn build(
        config: &FolioConfig,
        prefers_dark: Rc<dyn MediaSignal>,
        bridge: Option<Rc<PreferenceBridge>>,
    ) -> Self {
        let initial = AppState::with_defaults(config.default_theme, config.default_language);
        let scheme = initial.theme.resolve(prefers_dark.current());
        let store = Self {
            state: signal(initial.clone()),
            initial,
            scheme: signal(scheme),
            prefers_dark,
            system_subscription: RefCell::new(None),
            bridge,
            stop_persist: RefCell::new(None),
        };
        store.sync_scheme();
        store
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Apply an action. Actions apply in dispatch order.
    pub fn dispatch(&self, action: Action) {
        tracing::debug!(action = action.name(), "dispatch");
        let next = reduce(&self.state.get(), action, &self.initial);
        self.state.set(next);
        self.sync_scheme();
    }

    /// Re-derive the scheme marker and (un)subscribe from the OS signal.
    fn sync_scheme(&self) {
        let theme = self.state.get().theme;
        let scheme = theme.resolve(self.prefers_dark.current());
        if self.scheme.get() != scheme {
            self.scheme.set(scheme);
        }

        let mut subscription = self.system_subscription.borrow_mut();
        if theme == ThemeMode::System {
            if subscription.is_none() {
                let marker = self.scheme.clone();
                *subscription = Some(self.prefers_dark.on_change(Box::new(move |dark| {
                    tracing::trace!(dark, "os color scheme changed");
                    marker.set(ColorScheme::from_dark(dark));
                })));
            }
        } else if let Some(unsubscribe) = subscription.take() {
            drop(subscription);
            unsubscribe();
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn set_theme(&self, theme: ThemeMode) {
        self.dispatch(Action::SetTheme(theme));
    }

    pub fn set_language(&self, language: Language) {
        self.dispatch(Action::SetLanguage(language));
    }

    /// Cycle light → dark → system → light.
    pub fn toggle_theme(&self) {
        self.set_theme(self.theme().next());
    }

    /// Flip en ⇄ pt.
    pub fn toggle_language(&self) {
        self.set_language(self.language().toggled());
    }

    pub fn set_loading(&self, loading: bool) {
        self.dispatch(Action::SetLoading(loading));
    }

    /// Record an error. Also ends any loading state.
    pub fn set_error(&self, error: impl Into<String>) {
        self.dispatch(Action::SetError(Some(error.into())));
    }

    pub fn clear_error(&self) {
        self.dispatch(Action::SetError(None));
    }

    pub fn set_user(&self, user: Option<User>) {
        self.dispatch(Action::SetUser(user));
    }

    pub fn update_user_preferences(&self, patch: PreferencesPatch) {
        self.dispatch(Action::UpdateUserPreferences(patch));
    }

    pub fn reset_state(&self) {
        self.dispatch(Action::ResetState);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.get()
    }

    /// The state signal, for effects and deriveds.
    pub fn state_signal(&self) -> Signal<AppState> {
        self.state.clone()
    }

    pub fn theme(&self) -> ThemeMode {
        self.state.get().theme
    }

    pub fn language(&self) -> Language {
        self.state.get().language
    }

    /// Dark when the theme is dark, or system while the OS reports dark.
    pub fn is_dark(&self) -> bool {
        self.theme().resolve(self.prefers_dark.current()).is_dark()
    }

    pub fn is_light(&self) -> bool {
        !self.is_dark()
    }

    pub fn is_system(&self) -> bool {
        self.theme() == ThemeMode::System
    }

    pub fn is_english(&self) -> bool {
        self.language() == Language::En
    }

    pub fn is_portuguese(&self) -> bool {
        self.language() == Language::Pt
    }

    pub fn is_loading(&self) -> bool {
        self.state.get().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.get().error
    }

    pub fn has_error(&self) -> bool {
        self.state.get().error.is_some()
    }

    pub fn user(&self) -> Option<User> {
        self.state.get().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.get().user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .get()
            .user
            .is_some_and(|u| u.role == UserRole::Admin)
    }

    /// Effective scheme marker.
    pub fn scheme(&self) -> ColorScheme {
        self.scheme.get()
    }

    pub fn scheme_signal(&self) -> Signal<ColorScheme> {
        self.scheme.clone()
    }

    /// True while subscribed to OS color-scheme changes.
    pub fn is_tracking_system(&self) -> bool {
        self.system_subscription.borrow().is_some()
    }

    /// True when storage failed and preferences will not survive a reload.
    pub fn is_memory_only(&self) -> bool {
        self.bridge.as_ref().is_none_or(|b| b.is_degraded())
    }
}

impl Drop for PreferenceStore {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_persist.get_mut().take() {
            stop();
        }
        if let Some(unsubscribe) = self.system_subscription.get_mut().take() {
            unsubscribe();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::media::{AbsentMedia, ManualMedia};
    use crate::platform::storage::MemoryStorage;
    use crate::types::{PersistedPreferences, UserPreferences};
    use std::cell::Cell;

    const KEY: &str = "user-preferences";

    fn setup(dark: bool) -> (PreferenceStore, MemoryStorage, ManualMedia) {
        let storage = MemoryStorage::new();
        let media = ManualMedia::new(dark);
        let store = PreferenceStore::new(
            &FolioConfig::default(),
            Rc::new(storage.clone()),
            Rc::new(media.clone()),
        );
        (store, storage, media)
    }

    fn stored(storage: &MemoryStorage) -> PersistedPreferences {
        serde_json::from_str(&storage.peek(KEY).unwrap()).unwrap()
    }

    fn user(role: UserRole) -> User {
        User {
            id: "u1".to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            role,
            preferences: UserPreferences::default(),
        }
    }

    #[test]
    fn test_defaults() {
        let (store, _, _) = setup(false);
        assert_eq!(store.theme(), ThemeMode::System);
        assert_eq!(store.language(), Language::En);
        assert!(!store.is_loading());
        assert!(store.is_system());
        assert!(store.is_english());
    }

    #[test]
    fn test_toggle_theme_cycle() {
        let (store, _, _) = setup(false);
        store.set_theme(ThemeMode::Light);
        store.toggle_theme();
        assert_eq!(store.theme(), ThemeMode::Dark);
        store.toggle_theme();
        assert_eq!(store.theme(), ThemeMode::System);
        store.toggle_theme();
        assert_eq!(store.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_language() {
        let (store, _, _) = setup(false);
        store.toggle_language();
        assert!(store.is_portuguese());
        store.toggle_language();
        assert!(store.is_english());
    }

    #[test]
    fn test_system_theme_tracks_os() {
        let (store, _, media) = setup(false);
        assert!(!store.is_dark());
        assert_eq!(store.scheme(), ColorScheme::Light);

        media.set(true);
        assert!(store.is_dark());
        assert_eq!(store.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn test_explicit_theme_ignores_os() {
        let (store, _, media) = setup(true);
        store.set_theme(ThemeMode::Light);
        assert!(!store.is_tracking_system());
        assert_eq!(media.listener_count(), 0);

        media.set(false);
        media.set(true);
        assert!(store.is_light());
        assert_eq!(store.scheme(), ColorScheme::Light);
    }

    #[test]
    fn test_returning_to_system_resubscribes() {
        let (store, _, media) = setup(false);
        store.set_theme(ThemeMode::Dark);
        media.set(false);
        store.set_theme(ThemeMode::System);
        assert!(store.is_tracking_system());
        assert_eq!(media.listener_count(), 1);
        assert_eq!(store.scheme(), ColorScheme::Light);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (store, _, media) = setup(false);
        assert_eq!(media.listener_count(), 1);
        drop(store);
        assert_eq!(media.listener_count(), 0);
    }

    #[test]
    fn test_scheme_signal_is_reactive() {
        let (store, _, media) = setup(false);
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let scheme = store.scheme_signal();
        let _stop = effect(move || {
            let _ = scheme.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        media.set(true);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_error_clears_loading() {
        let (store, _, _) = setup(false);
        store.set_loading(true);
        store.set_error("network down");
        assert!(!store.is_loading());
        assert!(store.has_error());
        store.clear_error();
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_user_accessors() {
        let (store, _, _) = setup(false);
        assert!(!store.is_authenticated());
        store.set_user(Some(user(UserRole::Admin)));
        assert!(store.is_authenticated());
        assert!(store.is_admin());
        store.set_user(Some(user(UserRole::User)));
        assert!(!store.is_admin());
    }

    #[test]
    fn test_theme_cascades_to_user() {
        let (store, _, _) = setup(false);
        store.set_user(Some(user(UserRole::User)));
        store.set_theme(ThemeMode::Dark);
        store.set_language(Language::Pt);
        let prefs = store.user().unwrap().preferences;
        assert_eq!(prefs.theme, ThemeMode::Dark);
        assert_eq!(prefs.language, Language::Pt);
    }

    #[test]
    fn test_fresh_device_writes_defaults() {
        let (_store, storage, _) = setup(false);
        assert_eq!(storage.write_count(), 1);
        let blob = stored(&storage);
        assert_eq!(blob.theme, Some(ThemeMode::System));
        assert_eq!(blob.language, Some(Language::En));
    }

    #[test]
    fn test_persistence_round_trip() {
        let (store, storage, _) = setup(false);
        store.set_theme(ThemeMode::Dark);
        store.set_language(Language::Pt);
        assert_eq!(
            stored(&storage),
            PersistedPreferences {
                theme: Some(ThemeMode::Dark),
                language: Some(Language::Pt),
                animations: Some(true),
                notifications: Some(true),
            }
        );
    }

    #[test]
    fn test_repeated_set_writes_once() {
        let (store, storage, _) = setup(false);
        let before = storage.write_count();
        store.set_theme(ThemeMode::Dark);
        store.set_theme(ThemeMode::Dark);
        assert_eq!(storage.write_count(), before + 1);
    }

    #[test]
    fn test_non_preference_actions_do_not_write() {
        let (store, storage, _) = setup(false);
        let before = storage.write_count();
        store.set_loading(true);
        store.set_error("x");
        assert_eq!(storage.write_count(), before);
    }

    #[test]
    fn test_stored_preferences_applied_without_write() {
        let storage = MemoryStorage::with_entry(
            KEY,
            r#"{"theme":"light","language":"pt","animations":true,"notifications":true}"#,
        );
        let store = PreferenceStore::new(
            &FolioConfig::default(),
            Rc::new(storage.clone()),
            Rc::new(AbsentMedia),
        );
        assert_eq!(store.theme(), ThemeMode::Light);
        assert_eq!(store.language(), Language::Pt);
        assert_eq!(storage.write_count(), 0);
        assert_eq!(storage.read_count(), 1);
    }

    #[test]
    fn test_storage_failure_is_silent() {
        let storage = MemoryStorage::new();
        storage.fail_reads(true);
        storage.fail_writes(true);
        let store = PreferenceStore::new(
            &FolioConfig::default(),
            Rc::new(storage.clone()),
            Rc::new(AbsentMedia),
        );
        store.set_theme(ThemeMode::Dark);
        assert_eq!(store.theme(), ThemeMode::Dark);
        assert!(store.is_memory_only());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_user_preferences_persisted() {
        let (store, storage, _) = setup(false);
        store.set_user(Some(user(UserRole::User)));
        store.update_user_preferences(PreferencesPatch {
            animations: Some(false),
            ..Default::default()
        });
        assert_eq!(stored(&storage).animations, Some(false));
    }

    #[test]
    fn test_reset_state() {
        let (store, _, _) = setup(false);
        store.set_theme(ThemeMode::Dark);
        store.set_loading(true);
        store.reset_state();
        assert_eq!(store.state(), AppState::default());
        assert!(store.is_tracking_system());
    }

    #[test]
    fn test_in_memory_store() {
        let store = PreferenceStore::in_memory(&FolioConfig::default(), Rc::new(AbsentMedia));
        store.set_theme(ThemeMode::Dark);
        assert!(store.is_dark());
        assert!(store.is_memory_only());
    }

    #[test]
    fn test_stores_are_independent() {
        let (a, _, _) = setup(false);
        let (b, _, _) = setup(false);
        a.set_theme(ThemeMode::Dark);
        assert_eq!(b.theme(), ThemeMode::System);
    }
}
