//! UI state types shared by the engine and the TUI.
//!
//! Pure data types with no IO, no async, no ratatui dependency.

/// Which control receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Name,
    Email,
    Phone,
    Message,
    Submit,
}

impl FocusTarget {
    pub const ORDER: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Message,
        Self::Submit,
    ];

    #[must_use]
    pub const fn field(self) -> Option<crate::Field> {
        match self {
            Self::Name => Some(crate::Field::Name),
            Self::Email => Some(crate::Field::Email),
            Self::Phone => Some(crate::Field::Phone),
            Self::Message => Some(crate::Field::Message),
            Self::Submit => None,
        }
    }

    #[must_use]
    pub const fn from_field(field: crate::Field) -> Self {
        match field {
            crate::Field::Name => Self::Name,
            crate::Field::Email => Self::Email,
            crate::Field::Phone => Self::Phone,
            crate::Field::Message => Self::Message,
        }
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|target| *target == self)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// UI configuration options derived from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}
