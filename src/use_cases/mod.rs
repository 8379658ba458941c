// Use cases layer: countdown and RSVP workflows.

pub mod countdown;
pub mod rsvp;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use countdown::{
    CountdownEngine, CountdownExit, CountdownHandle, CountdownSettings, TickOutcome,
};
pub use rsvp::{PendingSubmission, RsvpFormController, RsvpSettings, SubmissionOutcome, SubmitStep};
pub use types::{RenderIntent, SubmissionState, Transition, publish};
