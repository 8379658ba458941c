// Domain layer: countdown arithmetic, RSVP rules, page contract and ports.

pub mod countdown;
pub mod errors;
pub mod page;
pub mod ports;
pub mod rsvp;

pub use countdown::{CountdownSnapshot, CountdownTarget, TimeUnit};
pub use errors::{InitError, SubmissionFault};
pub use page::ElementId;
pub use rsvp::{
    FieldOutcome, FormField, GuestCount, RsvpForm, RsvpSubmission, SubmissionReceipt,
    ValidationError, ValidationReason, ValidationResult, validate,
};
