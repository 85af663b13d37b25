//! Submission handling.
//!
//! A [`SubmissionController`] drives one form's submit button. It keeps at
//! most one request in flight, turns the single outcome into a notification
//! and, on success, a navigation.
//!
//! ```text
//! Idle -> Submitting -> Succeeded (terminal)
//!                    -> Failed -> Submitting (retry)
//! ```

mod flow;

pub use flow::*;

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use crate::errors::ServiceError;
use crate::forms::Form;
use crate::services::{DataService, Navigator, Notifier};

/// How long a success notification stays up.
pub const SUCCESS_DURATION_MS: u64 = 2000;
/// How long a failure notification stays up.
pub const FAILURE_DURATION_MS: u64 = 5000;
/// Dismiss action offered on failure notifications.
pub const FAILURE_ACTION: &str = "OK";

/// Position of a controller in its submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubmissionState {
    Idle = 0,
    Submitting = 1,
    Succeeded = 2,
    Failed = 3,
}

impl SubmissionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => SubmissionState::Submitting,
            2 => SubmissionState::Succeeded,
            3 => SubmissionState::Failed,
            _ => SubmissionState::Idle,
        }
    }
}

/// The single result of a submitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(String),
    Failure { status: u16, message: String },
}

impl From<Result<String, ServiceError>> for SubmissionOutcome {
    fn from(result: Result<String, ServiceError>) -> Self {
        match result {
            Ok(id) => SubmissionOutcome::Success(id),
            Err(err) => SubmissionOutcome::Failure {
                status: err.status,
                message: err.message,
            },
        }
    }
}

/// What a call to [`SubmissionController::submit`] amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// The request went out and its outcome was applied
    Settled(SubmissionOutcome),
    /// The form has errors; nothing was sent
    InvalidForm,
    /// Another submission is still pending; nothing was sent
    InFlight,
    /// This controller already succeeded; nothing was sent
    AlreadySucceeded,
    /// The view was torn down; the outcome, if any, was dropped
    Discarded,
}

/// Submit state machine for one form instance.
pub struct SubmissionController<F: Flow> {
    flow: F,
    service: Arc<dyn DataService>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: AtomicU8,
    alive: AtomicBool,
}

/// Controller of the add-lobby form.
pub type AddLobbyController = SubmissionController<AddLobbyFlow>;
/// Controller of the join form.
pub type JoinController = SubmissionController<JoinFlow>;

impl<F: Flow> SubmissionController<F> {
    pub fn new(
        flow: F,
        service: Arc<dyn DataService>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            flow,
            service,
            notifier,
            navigator,
            state: AtomicU8::new(SubmissionState::Idle as u8),
            alive: AtomicBool::new(true),
        }
    }

    pub fn state(&self) -> SubmissionState {
        SubmissionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// The view went away. Any outcome arriving later is dropped.
    pub fn teardown(&self) {
        self.alive.store(false, Ordering::Release);
    }

    /// Submit the form.
    ///
    /// Validity is checked and the draft snapshotted before this returns, so
    /// the form stays free to edit while the request is pending. Dropping the
    /// returned future before it completes puts the controller back to idle.
    pub fn submit(&self, form: &Form<F::Field>) -> impl Future<Output = SubmitResult> + '_ {
        let started = self.begin(form);
        async move {
            let (draft, guard) = match started {
                Ok(started) => started,
                Err(result) => return result,
            };

            let result = self.flow.send(self.service.as_ref(), &draft).await;
            self.settle(guard, &draft, result.into())
        }
    }

    fn begin(&self, form: &Form<F::Field>) -> Result<(F::Draft, PendingGuard<'_>), SubmitResult> {
        if !self.is_alive() {
            return Err(SubmitResult::Discarded);
        }

        let current = self.state();
        match current {
            SubmissionState::Submitting => return Err(SubmitResult::InFlight),
            SubmissionState::Succeeded => return Err(SubmitResult::AlreadySucceeded),
            SubmissionState::Idle | SubmissionState::Failed => {}
        }

        if !form.is_valid() {
            tracing::debug!(flow = ?self.flow.kind(), "Submit ignored, form is invalid");
            return Err(SubmitResult::InvalidForm);
        }
        let draft = self.flow.draft(form).ok_or(SubmitResult::InvalidForm)?;

        if let Err(actual) = self.state.compare_exchange(
            current as u8,
            SubmissionState::Submitting as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            return Err(match SubmissionState::from_u8(actual) {
                SubmissionState::Succeeded => SubmitResult::AlreadySucceeded,
                _ => SubmitResult::InFlight,
            });
        }

        tracing::info!(flow = ?self.flow.kind(), "Submitting {:?}", draft);
        Ok((draft, PendingGuard::new(&self.state)))
    }

    fn settle(
        &self,
        mut guard: PendingGuard<'_>,
        draft: &F::Draft,
        outcome: SubmissionOutcome,
    ) -> SubmitResult {
        guard.disarm();

        if !self.is_alive() {
            tracing::debug!(flow = ?self.flow.kind(), "Dropping outcome for torn down view");
            self.set_state(SubmissionState::Idle);
            return SubmitResult::Discarded;
        }

        let kind = self.flow.kind();
        match &outcome {
            SubmissionOutcome::Success(id) => {
                tracing::info!(flow = ?kind, id = %id, "Submission succeeded");
                let text = kind.success_text(self.flow.subject(draft));
                self.notifier.show(&text, None, SUCCESS_DURATION_MS);
                self.navigator.navigate(&self.flow.destination(id));
                self.set_state(SubmissionState::Succeeded);
            }
            SubmissionOutcome::Failure { status, message } => {
                let classified = crate::errors::classify(kind, *status, message);
                tracing::warn!(
                    flow = ?kind,
                    status = *status,
                    kind = %classified.kind,
                    "Submission failed: {}",
                    message
                );
                self.notifier
                    .show(&classified.text, Some(FAILURE_ACTION), FAILURE_DURATION_MS);
                self.set_state(SubmissionState::Failed);
            }
        }

        SubmitResult::Settled(outcome)
    }

    fn set_state(&self, state: SubmissionState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Marks a pending request. Resets the state to idle if dropped before the
/// outcome was settled.
struct PendingGuard<'a> {
    state: &'a AtomicU8,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(state: &'a AtomicU8) -> Self {
        Self { state, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Pending submission cancelled");
            self.state.store(SubmissionState::Idle as u8, Ordering::Release);
        }
    }
}
