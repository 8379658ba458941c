use crate::domain::page::ElementId;

/// Message shown in the blocking notice when a simulated submission faults.
pub const SUBMISSION_FAILURE_NOTICE: &str =
    "There was an error submitting your RSVP. Please try again.";

// Internal faults of the simulated submission. Recoverable: the form returns to
// its pre-submit state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionFault {
    #[error("local clock out of range: {0}")]
    ClockOutOfRange(i64),
    #[error("failed to encode rsvp payload: {0}")]
    Encoding(String),
    #[error("rsvp recorder failed: {0}")]
    Recorder(String),
}

// A feature initializer could not find an element it depends on. Fatal to that
// feature only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    #[error("required element `{0}` not found")]
    MissingElement(ElementId),
}
