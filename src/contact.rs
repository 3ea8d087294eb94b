//! Lead-capture contact form
//!
//! The only validation is that the visitor left some way to reach them.
//! Delivery goes through a [`FormSink`]; the site ships with [`LogSink`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown after a successful submission
pub const CONFIRMATION_MESSAGE: &str = "Got it. I'll be in touch within 24 hours.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please provide either an email or phone number")]
    MissingContactMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission failed: {0}")]
pub struct SinkError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Business,
    Email,
    Phone,
    Message,
}

impl ContactField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(ContactField::Name),
            "business" => Some(ContactField::Business),
            "email" => Some(ContactField::Email),
            "phone" => Some(ContactField::Phone),
            "message" => Some(ContactField::Message),
            _ => None,
        }
    }
}

/// Submission payload
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub business: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// At least one of email/phone must be present
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.email.is_empty() && self.phone.is_empty() {
            return Err(ContactError::MissingContactMethod);
        }
        Ok(())
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Business => self.business = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
            ContactField::Message => self.message = value,
        }
    }
}

/// Where accepted submissions go
pub trait FormSink {
    fn submit(&mut self, form: &ContactForm) -> Result<(), SinkError>;
}

/// Logs the payload instead of sending it anywhere
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl FormSink for LogSink {
    fn submit(&mut self, form: &ContactForm) -> Result<(), SinkError> {
        match serde_json::to_string(form) {
            Ok(json) => log::info!("Form submitted: {}", json),
            Err(e) => log::info!("Form submitted (unserializable: {})", e),
        }
        Ok(())
    }
}

/// Validate, then hand off to the sink.
///
/// Rejections never reach the sink. Sink failures are logged and not
/// surfaced; delivery is the sink's concern.
pub fn submit_contact(form: &ContactForm, sink: &mut dyn FormSink) -> Result<(), ContactError> {
    form.validate()?;
    if let Err(e) = sink.submit(form) {
        log::warn!("{}", e);
    }
    Ok(())
}

/// Form contents plus the user-visible error line
#[derive(Debug, Clone, Default)]
pub struct ContactFormState {
    pub form: ContactForm,
    error: Option<String>,
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editing either contact method clears the error
    pub fn edit(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.set(field, value);
        if matches!(field, ContactField::Email | ContactField::Phone) {
            self.error = None;
        }
    }

    /// Returns the confirmation message on success
    pub fn submit(&mut self, sink: &mut dyn FormSink) -> Result<&'static str, ContactError> {
        match submit_contact(&self.form, sink) {
            Ok(()) => {
                self.error = None;
                Ok(CONFIRMATION_MESSAGE)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        received: Vec<ContactForm>,
        fail: bool,
    }

    impl FormSink for RecordingSink {
        fn submit(&mut self, form: &ContactForm) -> Result<(), SinkError> {
            self.received.push(form.clone());
            if self.fail {
                Err(SinkError("offline".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_rejects_without_contact_method() {
        let form = ContactForm {
            name: "Sam".into(),
            message: "Hi".into(),
            ..ContactForm::default()
        };
        let mut sink = RecordingSink::default();
        let err = submit_contact(&form, &mut sink).unwrap_err();
        assert!(!err.to_string().is_empty());
        assert!(sink.received.is_empty());
    }

    #[test]
    fn test_phone_alone_is_enough() {
        let form = ContactForm {
            phone: "3065551234".into(),
            ..ContactForm::default()
        };
        let mut sink = RecordingSink::default();
        assert!(submit_contact(&form, &mut sink).is_ok());
        assert_eq!(sink.received.len(), 1);
    }

    #[test]
    fn test_presence_is_the_only_check() {
        let form = ContactForm {
            phone: " ".into(),
            ..ContactForm::default()
        };
        assert_eq!(form.validate(), Ok(()));
        assert_eq!(
            ContactForm::default().validate(),
            Err(ContactError::MissingContactMethod)
        );
    }

    #[test]
    fn test_sink_failure_is_not_surfaced() {
        let form = ContactForm {
            email: "a@b.co".into(),
            ..ContactForm::default()
        };
        let mut sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        assert!(submit_contact(&form, &mut sink).is_ok());
    }

    #[test]
    fn test_state_error_cleared_by_contact_edit_only() {
        let mut state = ContactFormState::new();
        let mut sink = LogSink;
        assert!(state.submit(&mut sink).is_err());
        assert_eq!(
            state.error(),
            Some("Please provide either an email or phone number")
        );
        state.edit(ContactField::Name, "Sam");
        assert!(state.error().is_some());
        state.edit(ContactField::Email, "sam@example.com");
        assert!(state.error().is_none());
        assert_eq!(state.submit(&mut sink), Ok(CONFIRMATION_MESSAGE));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(ContactField::from_name("phone"), Some(ContactField::Phone));
        assert_eq!(ContactField::from_name("fax"), None);
    }
}
