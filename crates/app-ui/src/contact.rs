//! Contact form validation and submission state
//!
//! Fields are checked only when the visitor submits. Every failing field is
//! reported at once. A valid form moves the state machine from `Idle` to
//! `Submitting`; the delivery outcome then moves it to `Success` (fields
//! cleared) or `Error`. The next edit after either outcome returns to `Idle`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Shortest accepted message, in UTF-16 code units
pub const MIN_MESSAGE_LENGTH: usize = 10;

// =============================================================================
// Form Data
// =============================================================================

/// Fields of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    /// Full name
    Name,
    /// Reply address
    Email,
    /// Subject line
    Subject,
    /// Message body
    Message,
}

impl ContactField {
    /// All fields in form order
    pub fn all() -> [ContactField; 4] {
        [ContactField::Name, ContactField::Email, ContactField::Subject, ContactField::Message]
    }
}

/// Values typed into the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Full name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

impl ContactForm {
    /// Value of a field
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Replace the value of a field
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Subject => self.subject = value,
            ContactField::Message => self.message = value,
        }
    }

    /// Empty every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Field left empty
    #[error("{}", required_message(.0))]
    Required(ContactField),

    /// Email does not look like `local@domain.tld`
    #[error("Por favor ingresa un email válido")]
    InvalidEmail,

    /// Message shorter than the minimum
    #[error("El mensaje debe tener al menos {min} caracteres")]
    TooShort {
        /// Minimum length
        min: usize,
    },
}

fn required_message(field: &ContactField) -> &'static str {
    match field {
        ContactField::Name => "El nombre es requerido",
        ContactField::Email => "El email es requerido",
        ContactField::Subject => "El asunto es requerido",
        ContactField::Message => "El mensaje es requerido",
    }
}

/// Errors from one submit attempt, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<ContactField, FieldError>,
}

impl FormErrors {
    /// Error for a field, if any
    pub fn get(&self, field: ContactField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Check if a field failed
    pub fn has(&self, field: ContactField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Check if nothing failed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields in form order
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    fn insert(&mut self, field: ContactField, error: FieldError) {
        self.errors.insert(field, error);
    }
}

/// Check `local@domain.tld` shape: no whitespace, one `@`, a `.` after it
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    });
    re.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Length as a browser reports it for a text field's value
fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Validate every field of a form
pub fn validate(form: &ContactForm) -> FormErrors {
    let mut errors = FormErrors::default();

    if is_blank(&form.name) {
        errors.insert(ContactField::Name, FieldError::Required(ContactField::Name));
    }

    if is_blank(&form.email) {
        errors.insert(ContactField::Email, FieldError::Required(ContactField::Email));
    } else if !is_valid_email(&form.email) {
        errors.insert(ContactField::Email, FieldError::InvalidEmail);
    }

    if is_blank(&form.subject) {
        errors.insert(ContactField::Subject, FieldError::Required(ContactField::Subject));
    }

    if is_blank(&form.message) {
        errors.insert(ContactField::Message, FieldError::Required(ContactField::Message));
    } else if text_length(&form.message) < MIN_MESSAGE_LENGTH {
        errors.insert(ContactField::Message, FieldError::TooShort { min: MIN_MESSAGE_LENGTH });
    }

    errors
}

// =============================================================================
// Submission State Machine
// =============================================================================

/// Where the form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    /// Editing
    #[default]
    Idle,
    /// Waiting for delivery
    Submitting,
    /// Delivered, form cleared
    Success,
    /// Delivery failed
    Error,
}

impl SubmitStatus {
    /// Banner text for the status, if it shows one
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            SubmitStatus::Success => {
                Some("¡Mensaje enviado exitosamente! Te contactaremos pronto.")
            }
            SubmitStatus::Error => {
                Some("Algo salió mal. Por favor intenta de nuevo o contáctanos directamente.")
            }
            SubmitStatus::Idle | SubmitStatus::Submitting => None,
        }
    }
}

/// Why a submit attempt did not start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    /// One or more fields failed validation
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FormErrors),

    /// A submission is already in flight
    #[error("A submission is already in progress")]
    InFlight,
}

/// Contact form with its errors and submit status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    form: ContactForm,
    errors: FormErrors,
    status: SubmitStatus,
}

impl ContactFormState {
    /// Create an empty, idle form
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Errors from the last submit attempt
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Current status
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// The submit control is disabled while a submission is in flight
    pub fn is_submit_disabled(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Visitor typed into a field
    ///
    /// Leaves `Success`/`Error` for `Idle`; errors stay until the next
    /// submit attempt.
    pub fn edit(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.set(field, value);
        if matches!(self.status, SubmitStatus::Success | SubmitStatus::Error) {
            self.status = SubmitStatus::Idle;
        }
    }

    /// Visitor pressed submit
    ///
    /// On success the state is `Submitting` and the returned snapshot is
    /// what should be delivered.
    pub fn begin_submit(&mut self) -> Result<ContactForm, SubmitRejected> {
        if self.status == SubmitStatus::Submitting {
            return Err(SubmitRejected::InFlight);
        }

        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            tracing::debug!(failing = self.errors.len(), "contact form rejected");
            return Err(SubmitRejected::Invalid(self.errors.clone()));
        }

        self.status = SubmitStatus::Submitting;
        Ok(self.form.clone())
    }

    /// Delivery succeeded
    pub fn complete(&mut self) {
        if self.status != SubmitStatus::Submitting {
            return;
        }
        self.status = SubmitStatus::Success;
        self.form.clear();
    }

    /// Delivery failed; the fields are kept for a retry
    pub fn fail(&mut self) {
        if self.status != SubmitStatus::Submitting {
            return;
        }
        self.status = SubmitStatus::Error;
    }
}
