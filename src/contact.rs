//! Contact form.
//!
//! The values record of the portfolio's contact section and its validation,
//! with messages in the visitor's language.

use std::future::Future;

use spark_signals::Signal;

use crate::error::SubmitError;
use crate::state::form::{FieldErrors, FieldValue, FormEngine, FormValues};
use crate::types::{AppState, Language};
use crate::validate::{sanitize_input, validate_email, validate_phone};

/// Minimum trimmed message length.
pub const MIN_MESSAGE_LENGTH: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub subject: String,
    pub message: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub newsletter: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Company,
    Subject,
    Message,
    ProjectType,
    Budget,
    Timeline,
    Newsletter,
}

impl FormValues for ContactForm {
    type Field = ContactField;

    fn fields() -> &'static [ContactField] {
        &[
            ContactField::Name,
            ContactField::Email,
            ContactField::Phone,
            ContactField::Company,
            ContactField::Subject,
            ContactField::Message,
            ContactField::ProjectType,
            ContactField::Budget,
            ContactField::Timeline,
            ContactField::Newsletter,
        ]
    }

    fn set_field(&mut self, field: ContactField, value: FieldValue) {
        match field {
            ContactField::Name => self.name = value.into_text(),
            ContactField::Email => self.email = value.into_text(),
            ContactField::Phone => self.phone = value.into_text(),
            ContactField::Company => self.company = value.into_text(),
            ContactField::Subject => self.subject = value.into_text(),
            ContactField::Message => self.message = value.into_text(),
            ContactField::ProjectType => self.project_type = value.into_text(),
            ContactField::Budget => self.budget = value.into_text(),
            ContactField::Timeline => self.timeline = value.into_text(),
            ContactField::Newsletter => self.newsletter = value.into_flag(),
        }
    }
}

impl ContactForm {
    /// Copy with free-text fields HTML-escaped, ready to hand off.
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize_input(&self.name),
            email: sanitize_input(&self.email),
            phone: sanitize_input(&self.phone),
            company: sanitize_input(&self.company),
            subject: sanitize_input(&self.subject),
            message: sanitize_input(&self.message),
            ..self.clone()
        }
    }
}

/// Localized validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactMessages {
    pub name_required: &'static str,
    pub email_required: &'static str,
    pub email_invalid: &'static str,
    pub phone_invalid: &'static str,
    pub subject_required: &'static str,
    pub message_required: &'static str,
    pub message_too_short: &'static str,
}

impl ContactMessages {
    pub const EN: Self = Self {
        name_required: "Name is required",
        email_required: "Email is required",
        email_invalid: "Invalid email format",
        phone_invalid: "Invalid phone format",
        subject_required: "Subject is required",
        message_required: "Message is required",
        message_too_short: "Message must be at least 10 characters",
    };

    pub const PT: Self = Self {
        name_required: "Nome é obrigatório",
        email_required: "Email é obrigatório",
        email_invalid: "Formato de email inválido",
        phone_invalid: "Formato de telefone inválido",
        subject_required: "Assunto é obrigatório",
        message_required: "Mensagem é obrigatória",
        message_too_short: "Mensagem deve ter pelo menos 10 caracteres",
    };

    pub fn for_language(language: Language) -> Self {
        match language {
            Language::En => Self::EN,
            Language::Pt => Self::PT,
        }
    }
}

/// Validate the contact form. Phone is optional but checked when present.
pub fn validate_contact(values: &ContactForm, language: Language) -> FieldErrors<ContactField> {
    let messages = ContactMessages::for_language(language);
    let mut errors = FieldErrors::new();

    if values.name.trim().is_empty() {
        errors.insert(ContactField::Name, messages.name_required.to_string());
    }

    if values.email.trim().is_empty() {
        errors.insert(ContactField::Email, messages.email_required.to_string());
    } else if !validate_email(&values.email).is_valid {
        errors.insert(ContactField::Email, messages.email_invalid.to_string());
    }

    if !values.phone.is_empty() && !validate_phone(&values.phone).is_valid {
        errors.insert(ContactField::Phone, messages.phone_invalid.to_string());
    }

    if values.subject.trim().is_empty() {
        errors.insert(ContactField::Subject, messages.subject_required.to_string());
    }

    let message = values.message.trim();
    if message.is_empty() {
        errors.insert(ContactField::Message, messages.message_required.to_string());
    } else if message.chars().count() < MIN_MESSAGE_LENGTH {
        errors.insert(ContactField::Message, messages.message_too_short.to_string());
    }

    errors
}

/// Form engine for the contact section.
///
/// Messages follow the language in `app_state` at validation time. The
/// handler receives sanitized values.
pub fn contact_form<S, Fut>(app_state: Signal<AppState>, on_submit: S) -> FormEngine<ContactForm>
where
    S: Fn(ContactForm) -> Fut + 'static,
    Fut: Future<Output = Result<(), SubmitError>> + 'static,
{
    FormEngine::new(
        ContactForm::default(),
        move |values: &ContactForm| validate_contact(values, app_state.get().language),
        move |values: ContactForm| on_submit(values.sanitized()),
    )
}

// =============================================================================
// TESTS
// =============================================================================
