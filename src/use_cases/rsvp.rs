// RSVP form controller: validation gate and the simulated submission state machine.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::{RenderIntent, SubmissionState, Transition, publish};
use crate::domain::errors::SUBMISSION_FAILURE_NOTICE;
use crate::domain::ports::{Clock, Delay, SubmissionRecorder};
use crate::domain::{
    ElementId, FormField, RsvpForm, RsvpSubmission, SubmissionFault, SubmissionReceipt,
    ValidationResult,
};

pub const DEFAULT_SUBMIT_LABEL: &str = "Send RSVP";
pub const BUSY_LABEL: &str = "Submitting...";

#[derive(Debug, Clone)]
pub struct RsvpSettings {
    /// Simulated network latency before the submission resolves.
    pub submit_delay: Duration,
    /// Label restored on the submit control after a failed attempt.
    pub submit_label: String,
    /// Label shown on the submit control while an attempt is in flight.
    pub busy_label: String,
    pub failure_message: String,
    pub success_transition: Transition,
}

impl Default for RsvpSettings {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(1500),
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
            busy_label: BUSY_LABEL.to_string(),
            failure_message: SUBMISSION_FAILURE_NOTICE.to_string(),
            success_transition: Transition::default(),
        }
    }
}

/// A validated submission waiting for its simulated latency. Only
/// `begin_submit` hands these out.
#[derive(Debug)]
pub struct PendingSubmission {
    submission: RsvpSubmission,
}

impl PendingSubmission {
    pub fn submission(&self) -> &RsvpSubmission {
        &self.submission
    }
}

/// First half of a submit attempt.
#[derive(Debug)]
pub enum SubmitStep {
    /// The controller is not accepting submissions in its current state.
    Ignored(SubmissionState),
    Rejected {
        result: ValidationResult,
        intents: Vec<RenderIntent>,
    },
    Accepted {
        pending: PendingSubmission,
        intents: Vec<RenderIntent>,
    },
}

#[derive(Debug, PartialEq)]
pub enum SubmissionOutcome {
    Ignored(SubmissionState),
    Rejected(ValidationResult),
    Succeeded(SubmissionReceipt),
    Failed(SubmissionFault),
}

/// Drives one RSVP form. Submissions are simulated: the payload is handed to
/// the recorder with a local-clock timestamp and nothing is persisted or sent.
pub struct RsvpFormController<C, D, R> {
    clock: C,
    delay: D,
    recorder: R,
    settings: RsvpSettings,
    state: SubmissionState,
    // States entered since the latest submit attempt began.
    trail: Vec<SubmissionState>,
    errors: BTreeSet<FormField>,
}

impl<C, D, R> RsvpFormController<C, D, R>
where
    C: Clock,
    D: Delay,
    R: SubmissionRecorder,
{
    pub fn new(clock: C, delay: D, recorder: R, settings: RsvpSettings) -> Self {
        Self {
            clock,
            delay,
            recorder,
            settings,
            state: SubmissionState::Idle,
            trail: Vec::new(),
            errors: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// States of the latest submit attempt, starting from the state it began in.
    pub fn attempt_trail(&self) -> &[SubmissionState] {
        &self.trail
    }

    /// Fields currently showing an inline error.
    pub fn fields_in_error(&self) -> Vec<FormField> {
        self.errors.iter().copied().collect()
    }

    pub fn field_edited(&mut self, field: FormField) -> Vec<RenderIntent> {
        let mut intents = Vec::new();
        if self.state == SubmissionState::Failed {
            self.transition(SubmissionState::Idle);
            intents.push(RenderIntent::DismissFailureNotice);
        }
        intents.extend(self.clear_field_error(field));
        intents
    }

    pub fn field_focused(&mut self, field: FormField) -> Vec<RenderIntent> {
        let mut intents = vec![RenderIntent::SetFieldGroupFocused {
            field,
            focused: true,
        }];
        intents.extend(self.clear_field_error(field));
        intents
    }

    pub fn field_blurred(&mut self, field: FormField) -> Vec<RenderIntent> {
        vec![RenderIntent::SetFieldGroupFocused {
            field,
            focused: false,
        }]
    }

    /// Manual reset after a failed attempt (the guest acknowledged the notice).
    pub fn dismiss_failure(&mut self) -> Vec<RenderIntent> {
        if self.state != SubmissionState::Failed {
            return Vec::new();
        }
        self.transition(SubmissionState::Idle);
        vec![RenderIntent::DismissFailureNotice]
    }

    /// Validates every field. On failure all errors are shown together and the
    /// first failing field is focused; on success the submit control goes busy.
    pub fn begin_submit(&mut self, form: &RsvpForm) -> SubmitStep {
        if self.state != SubmissionState::Idle {
            warn!(state = ?self.state, "rsvp submit ignored");
            return SubmitStep::Ignored(self.state);
        }

        self.trail = vec![self.state];
        self.transition(SubmissionState::Validating);
        // Previous error displays are cleared before anything is re-validated.
        let mut intents = vec![RenderIntent::ClearAllErrors];
        self.errors.clear();

        match form.to_submission() {
            Err(result) => {
                for error in result.errors() {
                    self.errors.insert(error.field);
                    intents.push(RenderIntent::ShowFieldError {
                        field: error.field,
                        message: error.reason.to_string(),
                    });
                }
                if let Some(first) = result.first_failure() {
                    intents.push(RenderIntent::FocusField { field: first.field });
                }
                info!(failed = self.errors.len(), "rsvp validation failed");
                self.transition(SubmissionState::Idle);
                SubmitStep::Rejected { result, intents }
            }
            Ok(submission) => {
                self.transition(SubmissionState::Submitting);
                intents.push(RenderIntent::SetSubmitBusy {
                    label: self.settings.busy_label.clone(),
                });
                SubmitStep::Accepted {
                    pending: PendingSubmission { submission },
                    intents,
                }
            }
        }
    }

    /// Waits out the simulated latency and settles the attempt.
    pub async fn complete_submit(
        &mut self,
        pending: PendingSubmission,
    ) -> (SubmissionOutcome, Vec<RenderIntent>) {
        self.delay.sleep(self.settings.submit_delay).await;

        match self.record(pending.submission) {
            Ok(receipt) => {
                info!(reference = %receipt.reference, "rsvp submission completed");
                self.transition(SubmissionState::Succeeded);
                let intents = vec![
                    RenderIntent::RevealSuccess {
                        transition: self.settings.success_transition,
                    },
                    RenderIntent::ScrollIntoView {
                        element: ElementId::SuccessPanel,
                    },
                ];
                (SubmissionOutcome::Succeeded(receipt), intents)
            }
            Err(fault) => {
                warn!(error = %fault, "rsvp submission failed");
                self.transition(SubmissionState::Failed);
                let intents = vec![
                    RenderIntent::RestoreSubmit {
                        label: self.settings.submit_label.clone(),
                    },
                    RenderIntent::ShowFailureNotice {
                        message: self.settings.failure_message.clone(),
                    },
                ];
                (SubmissionOutcome::Failed(fault), intents)
            }
        }
    }

    /// Full submit attempt, publishing each step's intents as it happens.
    pub async fn submit(
        &mut self,
        form: &RsvpForm,
        render_tx: &mpsc::Sender<RenderIntent>,
    ) -> SubmissionOutcome {
        match self.begin_submit(form) {
            SubmitStep::Ignored(state) => SubmissionOutcome::Ignored(state),
            SubmitStep::Rejected { result, intents } => {
                send_or_warn(render_tx, intents).await;
                SubmissionOutcome::Rejected(result)
            }
            SubmitStep::Accepted { pending, intents } => {
                send_or_warn(render_tx, intents).await;
                let (outcome, intents) = self.complete_submit(pending).await;
                send_or_warn(render_tx, intents).await;
                outcome
            }
        }
    }

    fn record(&self, submission: RsvpSubmission) -> Result<SubmissionReceipt, SubmissionFault> {
        let now = self.clock.now_epoch_millis();
        let submitted_at = DateTime::from_timestamp_millis(now)
            .ok_or(SubmissionFault::ClockOutOfRange(now))?
            .with_timezone(&Local);
        let receipt = SubmissionReceipt {
            reference: Uuid::new_v4(),
            submitted_at,
            submission,
        };

        self.recorder.record(&receipt)?;
        Ok(receipt)
    }

    fn clear_field_error(&mut self, field: FormField) -> Option<RenderIntent> {
        self.errors
            .remove(&field)
            .then_some(RenderIntent::ClearFieldError { field })
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!(from = ?self.state, to = ?next, "rsvp state transition");
        self.state = next;
        self.trail.push(next);
    }
}

async fn send_or_warn(render_tx: &mpsc::Sender<RenderIntent>, intents: Vec<RenderIntent>) {
    if publish(render_tx, intents).await.is_err() {
        warn!("render channel closed; rsvp intents dropped");
    }
}
