//! Core engine for Reel - the contact form state machine.
//!
//! This crate owns all form state without TUI dependencies:
//!
//! ```text
//! Idle --submit (valid)--> Submitting --resolved--> IdleWithNotification --3s--> Idle
//!   \
//!    --submit (invalid)--> IdleWithErrors
//! ```
//!
//! The network call runs on a spawned tokio task. [`App::tick`] polls it without
//! blocking, so every state mutation happens on the caller's loop.

use std::mem;
use std::sync::Arc;
use std::time::{Duration, Instant};

use url::Url;

mod config;
mod notifications;
mod submission;
mod ui;

pub use config::{
    AppConfig, ConfigError, EndpointConfig, FormSettings, ReelConfig, SettingsError, config_path,
    expand_env_vars,
};
pub use notifications::{NOTIFICATION_TTL, NotificationBanner};
pub use reel_client::{ClientError, ContactClient};
pub use reel_types::{
    ErrorState, Field, FieldError, FormState, Notification, NotificationKind, validate,
};
pub use ui::{FieldInput, FocusTarget, UiOptions};

use notifications::NotificationSlot;
use submission::{Resolution, SubmissionState, SubmitTask};

/// Spinner cadence, independent of render FPS.
const UI_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Coarse lifecycle position, derived from state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    IdleWithErrors,
    Submitting,
    IdleWithNotification,
}

/// What a submit request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation passed and the request is in flight.
    Started,
    /// At least one field failed validation; nothing was sent.
    Invalid,
    /// A submission is already in flight; the submit control is disabled.
    Busy,
}

pub struct App {
    inputs: [FieldInput; 4],
    errors: ErrorState,
    focus: FocusTarget,
    submission: SubmissionState,
    notifications: NotificationSlot,
    client: Arc<ContactClient>,
    ui_options: UiOptions,
    tick: usize,
    last_ui_tick: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(settings: FormSettings) -> Result<Self, ClientError> {
        let client = ContactClient::new(settings.endpoint, settings.timeout)?;
        tracing::info!(endpoint = %client.endpoint(), "Contact form ready");
        Ok(Self {
            inputs: Default::default(),
            errors: ErrorState::new(),
            focus: FocusTarget::default(),
            submission: SubmissionState::Idle,
            notifications: NotificationSlot::default(),
            client: Arc::new(client),
            ui_options: settings.ui,
            tick: 0,
            last_ui_tick: Instant::now(),
            should_quit: false,
        })
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    /// Current value of every field.
    #[must_use]
    pub fn form_state(&self) -> FormState {
        let mut form = FormState::new();
        for field in Field::ALL {
            form.set(field, self.value(field));
        }
        form
    }

    #[must_use]
    pub fn input(&self, field: Field) -> &FieldInput {
        &self.inputs[field.index()]
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.input(field).text()
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    #[must_use]
    pub fn error_message(&self, field: Field) -> Option<String> {
        self.errors.message(field)
    }

    #[must_use]
    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }

    /// The submit control is enabled exactly when nothing is in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current().map(NotificationBanner::notification)
    }

    #[must_use]
    pub fn notification_expires_at(&self) -> Option<Instant> {
        self.notifications.current().map(NotificationBanner::expires_at)
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        if self.is_submitting() {
            FormPhase::Submitting
        } else if self.notifications.current().is_some() {
            FormPhase::IdleWithNotification
        } else if !self.errors.is_empty() {
            FormPhase::IdleWithErrors
        } else {
            FormPhase::Idle
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------------

    pub fn set_focus(&mut self, focus: FocusTarget) {
        self.focus = focus;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    // ------------------------------------------------------------------------
    // Change handling
    // ------------------------------------------------------------------------

    /// Replace a field's value, as a change event would.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.change(field, |input| input.set_text(value));
    }

    /// Apply `edit` to `field`; if the text changed, re-validate that field only.
    fn change(&mut self, field: Field, edit: impl FnOnce(&mut FieldInput) -> bool) -> bool {
        let input = &mut self.inputs[field.index()];
        if !edit(input) {
            return false;
        }
        self.errors.revalidate(field, input.text());
        true
    }

    fn change_focused(&mut self, edit: impl FnOnce(&mut FieldInput) -> bool) -> bool {
        match self.focus.field() {
            Some(field) => self.change(field, edit),
            None => false,
        }
    }

    fn move_focused(&mut self, step: impl FnOnce(&mut FieldInput)) {
        if let Some(field) = self.focus.field() {
            step(&mut self.inputs[field.index()]);
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if matches!(c, '\n' | '\r') {
            self.insert_newline();
            return;
        }
        self.change_focused(|input| input.enter_char(c));
    }

    /// Insert pasted text. Line endings are normalized; single-line fields
    /// drop them entirely.
    pub fn insert_text(&mut self, text: &str) {
        let Some(field) = self.focus.field() else {
            return;
        };
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let text = if field.is_multiline() {
            normalized
        } else {
            normalized.replace('\n', "")
        };
        self.change(field, |input| input.enter_text(&text));
    }

    /// Newline in the message field; ignored elsewhere.
    pub fn insert_newline(&mut self) {
        if self.focus.field().is_some_and(Field::is_multiline) {
            self.change_focused(|input| input.enter_char('\n'));
        }
    }

    pub fn delete_char(&mut self) {
        self.change_focused(FieldInput::delete_char);
    }

    pub fn delete_char_forward(&mut self) {
        self.change_focused(FieldInput::delete_char_forward);
    }

    pub fn delete_word_backwards(&mut self) {
        self.change_focused(FieldInput::delete_word_backwards);
    }

    pub fn move_cursor_left(&mut self) {
        self.move_focused(FieldInput::move_cursor_left);
    }

    pub fn move_cursor_right(&mut self) {
        self.move_focused(FieldInput::move_cursor_right);
    }

    pub fn move_cursor_home(&mut self) {
        self.move_focused(FieldInput::move_cursor_home);
    }

    pub fn move_cursor_end(&mut self) {
        self.move_focused(FieldInput::move_cursor_end);
    }

    /// Enter key: advance from single-line fields, newline in the message,
    /// submit on the button.
    pub fn activate(&mut self) -> Option<SubmitAttempt> {
        match self.focus.field() {
            Some(field) if field.is_multiline() => {
                self.insert_newline();
                None
            }
            Some(_) => {
                self.focus_next();
                None
            }
            None => Some(self.submit()),
        }
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Validate every field and, if all pass, start the POST.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> SubmitAttempt {
        if self.is_submitting() {
            tracing::debug!("Submit ignored: submission already in flight");
            return SubmitAttempt::Busy;
        }

        let form = self.form_state();
        self.errors = ErrorState::from_form(&form);
        if !self.errors.is_empty() {
            let failing: Vec<&str> = self.errors.fields().map(Field::key).collect();
            tracing::debug!(fields = ?failing, "Submit blocked by validation");
            return SubmitAttempt::Invalid;
        }

        self.notifications.clear();

        let client = Arc::clone(&self.client);
        let handle = tokio::spawn(async move {
            let result = client.submit(&form).await;
            (result, Instant::now())
        });
        self.submission = SubmissionState::Submitting(SubmitTask::new(handle, Instant::now()));
        SubmitAttempt::Started
    }

    fn poll_submission(&mut self, now: Instant) {
        let finished = match &self.submission {
            SubmissionState::Submitting(task) => task.is_finished(),
            SubmissionState::Idle => false,
        };
        if !finished {
            return;
        }

        let SubmissionState::Submitting(task) = mem::take(&mut self.submission) else {
            return;
        };
        let started_at = task.started_at();
        let (resolution, finished_at) = task.resolve();
        // Expiry counts from request completion.
        let shown_at = finished_at.map_or(now, |finished_at| finished_at.min(now));
        let elapsed_ms = shown_at.saturating_duration_since(started_at).as_millis() as u64;

        match &resolution {
            Resolution::Accepted => {
                tracing::info!(elapsed_ms, "Submission complete; clearing form");
                // Errors are left as they are; nothing re-validates the blank fields.
                for input in &mut self.inputs {
                    input.clear();
                }
            }
            Resolution::Rejected(status) => {
                tracing::warn!(status, elapsed_ms, "Submission rejected by endpoint");
            }
            Resolution::Failed(reason) => {
                tracing::warn!(reason = ?reason, elapsed_ms, "Submission failed");
            }
        }

        self.notifications.show(resolution.notification(), shown_at);
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance state as of `now`: resolve a finished submission, expire the
    /// notification, and step the spinner.
    pub fn tick_at(&mut self, now: Instant) {
        self.poll_submission(now);

        if self.notifications.expire(now) {
            tracing::debug!("Notification expired");
        }

        if now.saturating_duration_since(self.last_ui_tick) >= UI_TICK_INTERVAL {
            self.last_ui_tick = now;
            self.tick = self.tick.wrapping_add(1);
        }
    }

    /// Abort any in-flight submission. Its outcome will never be shown.
    pub fn shutdown(&mut self) {
        if let SubmissionState::Submitting(task) = mem::take(&mut self.submission) {
            tracing::warn!("Aborting in-flight submission on shutdown");
            task.abort();
        }
    }
}
