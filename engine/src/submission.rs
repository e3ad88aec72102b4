//! In-flight submission tracking.

use std::time::Instant;

use futures_util::future::FutureExt;
use tokio::task::JoinHandle;

use reel_client::{SubmitError, SubmitOutcome};
use reel_types::Notification;

/// What the spawned POST yields: its result and the instant it completed.
pub(crate) type Completion = (Result<SubmitOutcome, SubmitError>, Instant);

/// A background POST. Existence proves a submission is in flight.
#[derive(Debug)]
pub(crate) struct SubmitTask {
    handle: JoinHandle<Completion>,
    started_at: Instant,
}

impl SubmitTask {
    pub(crate) fn new(handle: JoinHandle<Completion>, started_at: Instant) -> Self {
        Self { handle, started_at }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub(crate) fn started_at(&self) -> Instant {
        self.started_at
    }

    pub(crate) fn abort(&self) {
        self.handle.abort();
    }

    /// Resolve a finished task without blocking, along with the instant the
    /// request completed.
    ///
    /// Callers check [`Self::is_finished`] first; a task that is somehow not
    /// ready is reported as a transport failure rather than waited on. Only a
    /// task that ran to completion carries a completion instant.
    pub(crate) fn resolve(self) -> (Resolution, Option<Instant>) {
        match self.handle.now_or_never() {
            Some(Ok((result, finished_at))) => {
                let resolution = match result {
                    Ok(outcome) if outcome.is_accepted() => Resolution::Accepted,
                    Ok(outcome) => Resolution::Rejected(outcome.status().as_u16()),
                    Err(err) => Resolution::Failed(err.reason()),
                };
                (resolution, Some(finished_at))
            }
            Some(Err(join_err)) => (Resolution::Failed(Some(join_err.to_string())), None),
            None => (Resolution::Failed(None), None),
        }
    }
}

/// How a finished submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Accepted,
    Rejected(u16),
    Failed(Option<String>),
}

impl Resolution {
    pub(crate) fn notification(&self) -> Notification {
        match self {
            Self::Accepted => Notification::submitted(),
            Self::Rejected(_) => Notification::rejected(),
            Self::Failed(reason) => Notification::network_error(reason.as_deref()),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) enum SubmissionState {
    #[default]
    Idle,
    Submitting(SubmitTask),
}

impl SubmissionState {
    pub(crate) fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }
}
