//! Outcome banner shown after a submit attempt.

const SUBMITTED_TEXT: &str = "Form submitted successfully!";
const REJECTED_TEXT: &str = "Submission failed. Please try again.";
const NETWORK_ERROR_PREFIX: &str = "Network error: ";
const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient success/error message.
///
/// Only constructible through the outcome constructors below, so the texts
/// stay fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    kind: NotificationKind,
    text: String,
}

impl Notification {
    /// The endpoint accepted the submission (2xx).
    #[must_use]
    pub fn submitted() -> Self {
        Self {
            kind: NotificationKind::Success,
            text: SUBMITTED_TEXT.to_string(),
        }
    }

    /// The endpoint answered with a non-success status.
    #[must_use]
    pub fn rejected() -> Self {
        Self {
            kind: NotificationKind::Error,
            text: REJECTED_TEXT.to_string(),
        }
    }

    /// The request never completed. Blank or missing reasons fall back to
    /// "unknown error".
    #[must_use]
    pub fn network_error(reason: Option<&str>) -> Self {
        let reason = reason
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .unwrap_or(UNKNOWN_ERROR);
        Self {
            kind: NotificationKind::Error,
            text: format!("{NETWORK_ERROR_PREFIX}{reason}"),
        }
    }

    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, NotificationKind};

    #[test]
    fn outcome_texts() {
        let ok = Notification::submitted();
        assert_eq!(ok.kind(), NotificationKind::Success);
        assert_eq!(ok.text(), "Form submitted successfully!");

        let rejected = Notification::rejected();
        assert_eq!(rejected.kind(), NotificationKind::Error);
        assert_eq!(rejected.text(), "Submission failed. Please try again.");
    }

    #[test]
    fn network_error_includes_reason() {
        let n = Notification::network_error(Some("connection refused"));
        assert_eq!(n.kind(), NotificationKind::Error);
        assert_eq!(n.text(), "Network error: connection refused");
    }

    #[test]
    fn network_error_falls_back_when_reason_missing() {
        assert_eq!(
            Notification::network_error(None).text(),
            "Network error: unknown error"
        );
        assert_eq!(
            Notification::network_error(Some("  ")).text(),
            "Network error: unknown error"
        );
    }
}
