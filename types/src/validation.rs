//! Field validation rules and the per-field error map.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{Field, FormState};

/// local-part@domain.tld with no whitespace and a dot after the `@`.
/// U+FEFF counts as whitespace here, as it does for the blank check.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@\x{FEFF}]+@[^\s@\x{FEFF}]+\.[^\s@\x{FEFF}]+$")
        .expect("email pattern is valid")
});

const BYTE_ORDER_MARK: char = '\u{FEFF}';

fn is_blank(value: &str) -> bool {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .is_empty()
}

/// A single field's validation failure. `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .0.display_name())]
    Required(Field),
    #[error("Enter a valid email")]
    InvalidEmail,
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Validate one field value.
///
/// Every field is required (including phone). The email format check only
/// runs on non-blank input and sees the untrimmed value.
pub fn validate(field: Field, value: &str) -> Result<(), FieldError> {
    if is_blank(value) {
        return Err(FieldError::Required(field));
    }
    if field == Field::Email && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// Validation errors currently shown, keyed by field.
///
/// A field has an entry only while it is failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    errors: BTreeMap<Field, FieldError>,
}

impl ErrorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every field of `form` from scratch.
    #[must_use]
    pub fn from_form(form: &FormState) -> Self {
        let errors = form
            .iter()
            .filter_map(|(field, value)| validate(field, value).err().map(|err| (field, err)))
            .collect();
        Self { errors }
    }

    /// Re-run validation for a single field, leaving every other entry alone.
    pub fn revalidate(&mut self, field: Field, value: &str) {
        match validate(field, value) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(err) => {
                self.errors.insert(field, err);
            }
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Message to render under `field`, if it is failing.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|err| err.to_string())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorState, FieldError, is_valid_email, validate};
    use crate::{Field, FormState};

    #[test]
    fn blank_values_are_required_for_every_field() {
        for field in Field::ALL {
            assert_eq!(validate(field, ""), Err(FieldError::Required(field)));
            assert_eq!(validate(field, "   \t"), Err(FieldError::Required(field)));
        }
    }

    #[test]
    fn required_messages_capitalize_the_field() {
        assert_eq!(
            FieldError::Required(Field::Name).to_string(),
            "Name is required"
        );
        assert_eq!(
            FieldError::Required(Field::Phone).to_string(),
            "Phone is required"
        );
        assert_eq!(
            FieldError::Required(Field::Message).to_string(),
            "Message is required"
        );
        assert_eq!(FieldError::InvalidEmail.to_string(), "Enter a valid email");
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("jo@x.com"));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("@b.co"));
    }

    #[test]
    fn required_short_circuits_email_format() {
        assert_eq!(
            validate(Field::Email, " "),
            Err(FieldError::Required(Field::Email))
        );
        assert_eq!(validate(Field::Email, "abc"), Err(FieldError::InvalidEmail));
        assert_eq!(validate(Field::Email, "a@b.co"), Ok(()));
    }

    #[test]
    fn email_format_sees_untrimmed_value() {
        assert_eq!(
            validate(Field::Email, " a@b.co"),
            Err(FieldError::InvalidEmail)
        );
    }

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        assert_eq!(
            validate(Field::Name, "\u{FEFF}"),
            Err(FieldError::Required(Field::Name))
        );
        assert_eq!(
            validate(Field::Message, " \u{FEFF}\n"),
            Err(FieldError::Required(Field::Message))
        );
        assert_eq!(validate(Field::Name, "\u{FEFF}Jo"), Ok(()));
        assert_eq!(
            validate(Field::Email, "a\u{FEFF}@b.co"),
            Err(FieldError::InvalidEmail)
        );
        assert!(!is_valid_email("a@b.\u{FEFF}co"));
    }

    #[test]
    fn non_email_fields_have_no_format_check() {
        assert_eq!(validate(Field::Phone, "not a number"), Ok(()));
        assert_eq!(validate(Field::Name, "@@@"), Ok(()));
    }

    #[test]
    fn from_form_reports_only_phone_for_missing_phone() {
        let form = FormState {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            phone: String::new(),
            message: "Hi".to_string(),
        };
        let errors = ErrorState::from_form(&form);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Phone]);
        assert_eq!(
            errors.message(Field::Phone).as_deref(),
            Some("Phone is required")
        );
    }

    #[test]
    fn revalidate_touches_only_its_field() {
        let mut errors = ErrorState::from_form(&FormState::new());
        assert_eq!(errors.len(), 4);

        errors.revalidate(Field::Name, "Jo");
        assert_eq!(errors.get(Field::Name), None);
        assert_eq!(errors.get(Field::Email), Some(FieldError::Required(Field::Email)));
        assert_eq!(errors.len(), 3);

        errors.revalidate(Field::Email, "nope");
        assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidEmail));
        assert_eq!(errors.get(Field::Phone), Some(FieldError::Required(Field::Phone)));
    }
}
