//! Form Engine - value/error/touched state for one form
//!
//! Generic over the values record through [`FormValues`]. Validation is a
//! synchronous caller-supplied function; submission is a caller-supplied
//! future.
//!
//! Field lifecycle: untouched -> touched -> valid | invalid. Errors become
//! visible on blur, never on the first keystroke:
//! - `handle_change` updates the value and revalidates once the field is touched
//! - `handle_blur` marks the field touched and revalidates
//! - `handle_submit` touches every field, validates, and calls the submit
//!   handler only when there are no errors
//!
//! # Example
//!
//! ```ignore
//! let form = FormEngine::new(ContactForm::default(), validate, |values| async move {
//!     send(values).await
//! });
//! form.handle_change(ContactField::Email, "ana@example.com");
//! form.handle_blur(ContactField::Email);
//! let status = form.handle_submit().await?;
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::future::Future;

use futures::future::{FutureExt, LocalBoxFuture};
use spark_signals::{signal, Signal};

use crate::error::SubmitError;

// =============================================================================
// TYPES
// =============================================================================

/// A value written into a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Text content. Flags read as `"true"`/`"false"`.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Flag(flag) => flag.to_string(),
        }
    }

    /// Flag content. Text reads as true when non-empty.
    pub fn into_flag(self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Flag(flag) => flag,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// A record of form values with a closed set of fields.
pub trait FormValues: Clone + PartialEq + 'static {
    type Field: Copy + Ord + Debug + 'static;

    /// Every field, in display order.
    fn fields() -> &'static [Self::Field];

    fn set_field(&mut self, field: Self::Field, value: FieldValue);
}

/// Error message per failing field.
pub type FieldErrors<F> = BTreeMap<F, String>;

/// Snapshot of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T: FormValues> {
    pub values: T,
    pub errors: FieldErrors<T::Field>,
    pub touched: BTreeSet<T::Field>,
    pub is_submitting: bool,
}

impl<T: FormValues> FormState<T> {
    fn new(values: T) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            is_submitting: false,
        }
    }
}

/// Outcome of [`FormEngine::handle_submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// The handler ran and succeeded. The form was reset.
    Submitted,
    /// Validation failed. The handler was not called.
    Invalid,
    /// A submission is already in flight. The handler was not called.
    AlreadySubmitting,
}

/// Clears `is_submitting` when dropped, so a submit future dropped mid-flight
/// does not leave the form locked.
struct SubmittingGuard<'a, T: FormValues> {
    state: &'a Signal<FormState<T>>,
}

impl<T: FormValues> Drop for SubmittingGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.state.get();
        if state.is_submitting {
            state.is_submitting = false;
            self.state.set(state);
        }
    }
}

type ValidateFn<T> = Box<dyn Fn(&T) -> FieldErrors<<T as FormValues>::Field>>;
type SubmitFn<T> = Box<dyn Fn(T) -> LocalBoxFuture<'static, Result<(), SubmitError>>>;

// =============================================================================
// ENGINE
// =============================================================================

pub struct FormEngine<T: FormValues> {
    initial: T,
    state: Signal<FormState<T>>,
    validate: ValidateFn<T>,
    on_submit: SubmitFn<T>,
}

impl<T: FormValues> FormEngine<T> {
    pub fn new<V, S, Fut>(initial_values: T, validate: V, on_submit: S) -> Self
    where
        V: Fn(&T) -> FieldErrors<T::Field> + 'static,
        S: Fn(T) -> Fut + 'static,
        Fut: Future<Output = Result<(), SubmitError>> + 'static,
    {
        Self {
            state: signal(FormState::new(initial_values.clone())),
            initial: initial_values,
            validate: Box::new(validate),
            on_submit: Box::new(move |values| on_submit(values).boxed_local()),
        }
    }

    fn update(&self, f: impl FnOnce(&mut FormState<T>)) {
        let mut state = self.state.get();
        f(&mut state);
        self.state.set(state);
    }

    /// Write a field. Errors are recomputed only once the field was touched.
    pub fn handle_change(&self, field: T::Field, value: impl Into<FieldValue>) {
        let value = value.into();
        self.update(|state| {
            state.values.set_field(field, value);
            if state.touched.contains(&field) {
                state.errors = (self.validate)(&state.values);
            }
        });
    }

    /// Mark a field touched and recompute errors.
    pub fn handle_blur(&self, field: T::Field) {
        self.update(|state| {
            state.touched.insert(field);
            state.errors = (self.validate)(&state.values);
        });
    }

    /// Validate everything and, when valid, run the submit handler.
    ///
    /// `is_submitting` is true only while the handler runs and is cleared
    /// whatever its outcome, including when this future is dropped before it
    /// settles. Handler errors are returned unchanged; on
    /// success the form resets to its initial values.
    pub async fn handle_submit(&self) -> Result<SubmitStatus, SubmitError> {
        let mut state = self.state.get();
        if state.is_submitting {
            tracing::debug!("submit ignored, already submitting");
            return Ok(SubmitStatus::AlreadySubmitting);
        }

        state.touched.extend(T::fields().iter().copied());
        state.errors = (self.validate)(&state.values);
        if !state.errors.is_empty() {
            tracing::debug!(fields = ?state.errors.keys().collect::<Vec<_>>(), "submit blocked by validation");
            self.state.set(state);
            return Ok(SubmitStatus::Invalid);
        }

        state.is_submitting = true;
        let values = state.values.clone();
        self.state.set(state);
        let _submitting = SubmittingGuard { state: &self.state };
        tracing::debug!("submitting form");

        match (self.on_submit)(values).await {
            Ok(()) => {
                tracing::debug!("form submitted");
                self.reset_form();
                Ok(SubmitStatus::Submitted)
            }
            Err(err) => {
                tracing::warn!(error = %err, "form submission failed");
                Err(err)
            }
        }
    }

    /// Back to the initial values with no errors and nothing touched.
    pub fn reset_form(&self) {
        self.state.set(FormState::new(self.initial.clone()));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> FormState<T> {
        self.state.get()
    }

    /// Reactive view of the whole form.
    pub fn signal(&self) -> Signal<FormState<T>> {
        self.state.clone()
    }

    pub fn values(&self) -> T {
        self.state.get().values
    }

    pub fn errors(&self) -> FieldErrors<T::Field> {
        self.state.get().errors
    }

    pub fn error(&self, field: T::Field) -> Option<String> {
        self.state.get().errors.get(&field).cloned()
    }

    /// Error to render: only for touched fields.
    pub fn visible_error(&self, field: T::Field) -> Option<String> {
        let state = self.state.get();
        if state.touched.contains(&field) {
            state.errors.get(&field).cloned()
        } else {
            None
        }
    }

    pub fn is_touched(&self, field: T::Field) -> bool {
        self.state.get().touched.contains(&field)
    }

    pub fn is_submitting(&self) -> bool {
        self.state.get().is_submitting
    }

    /// True when the last validation pass found no errors.
    pub fn is_valid(&self) -> bool {
        self.state.get().errors.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::task::noop_waker_ref;
    use spark_signals::effect;
    use std::cell::{Cell, RefCell};
    use std::pin::pin;
    use std::rc::Rc;
    use std::task::{Context, Poll};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Signup {
        email: String,
        agree: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum SignupField {
        Email,
        Agree,
    }

    impl FormValues for Signup {
        type Field = SignupField;

        fn fields() -> &'static [SignupField] {
            &[SignupField::Email, SignupField::Agree]
        }

        fn set_field(&mut self, field: SignupField, value: FieldValue) {
            match field {
                SignupField::Email => self.email = value.into_text(),
                SignupField::Agree => self.agree = value.into_flag(),
            }
        }
    }

    fn validate(values: &Signup) -> FieldErrors<SignupField> {
        let mut errors = BTreeMap::new();
        if values.email.is_empty() {
            errors.insert(SignupField::Email, "Email is required".to_string());
        }
        errors
    }

    fn setup() -> (FormEngine<Signup>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let form = FormEngine::new(Signup::default(), validate, move |_values: Signup| {
            counter.set(counter.get() + 1);
            async { Ok::<(), SubmitError>(()) }
        });
        (form, calls)
    }

    #[test]
    fn test_change_before_blur_shows_no_error() {
        let (form, _) = setup();
        form.handle_change(SignupField::Email, "x");
        assert_eq!(form.values().email, "x");
        assert!(form.error(SignupField::Email).is_none());
        assert!(!form.is_touched(SignupField::Email));
    }

    #[test]
    fn test_blur_validates() {
        let (form, _) = setup();
        form.handle_change(SignupField::Email, "x");
        form.handle_change(SignupField::Email, "");
        assert!(form.error(SignupField::Email).is_none());

        form.handle_blur(SignupField::Email);
        assert_eq!(form.error(SignupField::Email).as_deref(), Some("Email is required"));
        assert!(form.is_touched(SignupField::Email));
    }

    #[test]
    fn test_change_after_touch_revalidates() {
        let (form, _) = setup();
        form.handle_blur(SignupField::Email);
        assert!(!form.is_valid());
        form.handle_change(SignupField::Email, "a@b.co");
        assert!(form.is_valid());
    }

    #[test]
    fn test_visible_error_requires_touch() {
        let (form, _) = setup();
        form.handle_blur(SignupField::Agree);
        assert!(form.error(SignupField::Email).is_some());
        assert!(form.visible_error(SignupField::Email).is_none());
    }

    #[test]
    fn test_invalid_submit_never_calls_handler() {
        let (form, calls) = setup();
        let saw_submitting = Rc::new(Cell::new(false));
        let saw = saw_submitting.clone();
        let state = form.signal();
        let _stop = effect(move || {
            if state.get().is_submitting {
                saw.set(true);
            }
        });

        let status = block_on(form.handle_submit()).unwrap();
        assert_eq!(status, SubmitStatus::Invalid);
        assert_eq!(calls.get(), 0);
        assert!(!saw_submitting.get());
        assert!(form.is_touched(SignupField::Email));
        assert!(form.is_touched(SignupField::Agree));
        assert!(form.error(SignupField::Email).is_some());
    }

    #[test]
    fn test_valid_submit_resets() {
        let (form, calls) = setup();
        form.handle_change(SignupField::Email, "a@b.co");
        form.handle_change(SignupField::Agree, true);

        let status = block_on(form.handle_submit()).unwrap();
        assert_eq!(status, SubmitStatus::Submitted);
        assert_eq!(calls.get(), 1);
        assert_eq!(form.values(), Signup::default());
        assert!(form.state().touched.is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_handler_receives_values() {
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let form = FormEngine::new(Signup::default(), validate, move |values: Signup| {
            *sink.borrow_mut() = Some(values);
            async { Ok::<(), SubmitError>(()) }
        });
        form.handle_change(SignupField::Email, "a@b.co");
        block_on(form.handle_submit()).unwrap();
        assert_eq!(seen.borrow().as_ref().map(|v| v.email.as_str()), Some("a@b.co"));
    }

    #[test]
    fn test_failed_submit_clears_flag_and_keeps_values() {
        let form = FormEngine::new(Signup::default(), validate, |_values: Signup| async {
            Err::<(), SubmitError>(SubmitError::Rejected("offline".to_string()))
        });
        form.handle_change(SignupField::Email, "a@b.co");

        let result = block_on(form.handle_submit());
        assert!(matches!(result, Err(SubmitError::Rejected(ref reason)) if reason == "offline"));
        assert!(!form.is_submitting());
        assert_eq!(form.values().email, "a@b.co");
    }

    #[test]
    fn test_submitting_flag_and_double_submit() {
        let (sender, receiver) = oneshot::channel::<Result<(), SubmitError>>();
        let receiver = Rc::new(RefCell::new(Some(receiver)));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let form = FormEngine::new(Signup::default(), validate, move |_values: Signup| {
            counter.set(counter.get() + 1);
            let pending = receiver.borrow_mut().take();
            async move {
                match pending {
                    Some(rx) => rx.await.unwrap_or(Ok(())),
                    None => Ok(()),
                }
            }
        });
        form.handle_change(SignupField::Email, "a@b.co");

        let mut first = pin!(form.handle_submit());
        let mut cx = Context::from_waker(noop_waker_ref());
        assert!(matches!(first.as_mut().poll(&mut cx), Poll::Pending));
        assert!(form.is_submitting());

        let second = block_on(form.handle_submit()).unwrap();
        assert_eq!(second, SubmitStatus::AlreadySubmitting);
        assert_eq!(calls.get(), 1);

        sender.send(Ok(())).unwrap();
        assert_eq!(block_on(first).unwrap(), SubmitStatus::Submitted);
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_dropped_submit_unlocks_form() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let form = FormEngine::new(Signup::default(), validate, move |_values: Signup| {
            counter.set(counter.get() + 1);
            let first = counter.get() == 1;
            async move {
                if first {
                    futures::future::pending::<()>().await;
                }
                Ok::<(), SubmitError>(())
            }
        });
        form.handle_change(SignupField::Email, "a@b.co");

        {
            let mut cancelled = pin!(form.handle_submit());
            let mut cx = Context::from_waker(noop_waker_ref());
            assert!(matches!(cancelled.as_mut().poll(&mut cx), Poll::Pending));
            assert!(form.is_submitting());
        }

        assert!(!form.is_submitting());
        assert_eq!(form.values().email, "a@b.co");
        assert_eq!(block_on(form.handle_submit()).unwrap(), SubmitStatus::Submitted);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_reset_form() {
        let (form, _) = setup();
        form.handle_change(SignupField::Email, "a@b.co");
        form.handle_blur(SignupField::Email);
        form.reset_form();
        assert_eq!(form.state(), FormState::new(Signup::default()));
    }

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::from("yes").into_flag(), true);
        assert_eq!(FieldValue::from("").into_flag(), false);
        assert_eq!(FieldValue::from(true).into_text(), "true");
    }
}
