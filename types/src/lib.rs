//! Core domain types for Reel.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod notification;
pub mod ui;
mod validation;

pub use notification::{Notification, NotificationKind};
pub use validation::{ErrorState, FieldError, is_valid_email, validate};

use serde::Serialize;

// ============================================================================
// Field
// ============================================================================

/// One of the four inputs on the contact form.
///
/// Declaration order is display order and the order used for focus traversal
/// and full-form validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    /// Wire key used in the JSON payload.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }

    /// The key with its first letter capitalized, as used in validation messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Message => "Message",
        }
    }

    /// Label shown above the input. Phone is not marked with `*` even though
    /// validation treats it as required.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Your name*",
            Self::Email => "Your email*",
            Self::Phone => "Phone",
            Self::Message => "Your message*",
        }
    }

    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Enter your name",
            Self::Email => "Enter your email",
            Self::Phone => "Enter your phone number",
            Self::Message => "Write your message...",
        }
    }

    #[must_use]
    pub const fn is_multiline(self) -> bool {
        matches!(self, Self::Message)
    }

    /// Visible text rows for the input.
    #[must_use]
    pub const fn rows(self) -> u16 {
        if self.is_multiline() { 5 } else { 1 }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Phone => 2,
            Self::Message => 3,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// FormState
// ============================================================================

/// Current value of every field. All four are always present.
///
/// Serializes to the exact request body the contact endpoint expects:
/// `{"name": "...", "email": "...", "phone": "...", "message": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// True when every field is the empty string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.iter().all(|(_, value)| value.is_empty())
    }
}
