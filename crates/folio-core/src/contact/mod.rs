//! Contact form: validation, submission, and submit-button status.

pub mod client;
pub mod status;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

pub use client::{ContactClient, ContactError, Submission};
pub use status::{SubmitStatus, SubmitTracker};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("email regex: {e}"))
});

/// A form field, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    /// The field after this one, wrapping around.
    pub fn next(self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Subject => Field::Email,
            Field::Message => Field::Subject,
        }
    }
}

/// A validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A form that passed validation, with every value trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ValidContact {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validates every field, reporting all failures in field order.
    ///
    /// # Errors
    /// Returns the failing fields and their messages.
    pub fn validate(&self) -> Result<ValidContact, Vec<FieldError>> {
        let name = self.name.trim();
        let email = self.email.trim();
        let subject = self.subject.trim();
        let message = self.message.trim();

        let mut errors = Vec::new();
        if name.chars().count() < 2 {
            errors.push(FieldError {
                field: Field::Name,
                message: "Please enter your full name (min 2 characters).",
            });
        }
        if !is_valid_email(email) {
            errors.push(FieldError {
                field: Field::Email,
                message: "Please enter a valid email address.",
            });
        }
        if subject.chars().count() < 3 {
            errors.push(FieldError {
                field: Field::Subject,
                message: "Please enter a subject (min 3 characters).",
            });
        }
        if message.chars().count() < 10 {
            errors.push(FieldError {
                field: Field::Message,
                message: "Message must be at least 10 characters long.",
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidContact {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        })
    }
}

/// Errors currently shown under the form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl FieldErrors {
    /// Replaces all errors with `errors`.
    pub fn set(&mut self, errors: Vec<FieldError>) {
        self.errors = errors.into_iter().map(|e| (e.field, e.message)).collect();
    }

    /// Clears one field's error, e.g. when the user edits it.
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "  Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "I enjoyed your portfolio.".to_string(),
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let contact = filled().validate().unwrap();
        assert_eq!(contact.name(), "Ada Lovelace");
        assert_eq!(contact.email(), "ada@example.com");
        assert_eq!(contact.subject(), "Hello");
        assert_eq!(contact.message(), "I enjoyed your portfolio.");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = ContactForm::default().validate().unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
        assert_eq!(
            errors[0].message,
            "Please enter your full name (min 2 characters)."
        );
        assert_eq!(errors[3].message, "Message must be at least 10 characters long.");
    }

    #[test]
    fn test_minimum_lengths_apply_after_trim() {
        let form = ContactForm {
            name: " A ".to_string(),
            subject: "  ab  ".to_string(),
            message: "  123456789  ".to_string(),
            ..filled()
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Subject, Field::Message]);

        let form = ContactForm {
            name: "Al".to_string(),
            subject: "abc".to_string(),
            message: "1234567890".to_string(),
            ..filled()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.de"));
        assert!(!is_valid_email(""));

        let form = ContactForm {
            email: "  ada@example.com  ".to_string(),
            ..filled()
        };
        assert_eq!(form.validate().unwrap().email(), "ada@example.com");
    }

    #[test]
    fn test_field_errors_clear_on_edit() {
        let mut errors = FieldErrors::default();
        errors.set(ContactForm::default().validate().unwrap_err());
        assert_eq!(errors.get(Field::Email), Some("Please enter a valid email address."));

        errors.clear(Field::Email);
        assert_eq!(errors.get(Field::Email), None);
        assert!(errors.get(Field::Name).is_some());

        errors.clear_all();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_field_order_wraps() {
        assert_eq!(Field::Message.next(), Field::Name);
        assert_eq!(Field::Name.prev(), Field::Message);
        for field in Field::ALL {
            assert_eq!(field.next().prev(), field);
        }
    }

    #[test]
    fn test_form_accessors() {
        let mut form = filled();
        form.get_mut(Field::Subject).push('!');
        assert_eq!(form.get(Field::Subject), "Hello!");
        form.clear();
        assert_eq!(form, ContactForm::default());
    }
}
