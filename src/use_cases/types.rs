// Use-case level outputs: render intents consumed by the page adapter.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::domain::{ElementId, FormField, TimeUnit};

/// Entrance transition for the success panel (fade in while sliding up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub slide_from_px: u32,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            slide_from_px: 20,
        }
    }
}

/// One UI mutation. Components only describe changes; the page adapter applies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderIntent {
    // Countdown region.
    SetUnit { unit: TimeUnit, value: u64 },
    HighlightUnit { unit: TimeUnit, on: bool },
    ShowCompletion { message: String },

    // RSVP form region.
    ClearAllErrors,
    ShowFieldError { field: FormField, message: String },
    ClearFieldError { field: FormField },
    FocusField { field: FormField },
    SetFieldGroupFocused { field: FormField, focused: bool },
    SetSubmitBusy { label: String },
    RestoreSubmit { label: String },
    // Hides the form and reveals the success panel in one step.
    RevealSuccess { transition: Transition },
    ScrollIntoView { element: ElementId },
    ShowFailureNotice { message: String },
    DismissFailureNotice,
}

/// Lifecycle of a single RSVP attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Sends intents in order; fails once the page adapter has gone away.
pub async fn publish(
    render_tx: &mpsc::Sender<RenderIntent>,
    intents: impl IntoIterator<Item = RenderIntent>,
) -> Result<(), mpsc::error::SendError<RenderIntent>> {
    for intent in intents {
        render_tx.send(intent).await?;
    }
    Ok(())
}
