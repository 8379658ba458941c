// Logical identities of the page elements the countdown and RSVP form read or write.

use std::fmt;

use crate::domain::countdown::TimeUnit;
use crate::domain::rsvp::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Days,
    Hours,
    Minutes,
    Seconds,
    CountdownHeading,
    RsvpForm,
    GuestName,
    GuestCount,
    ContactInfo,
    DietaryPreferences,
    SubmitButton,
    SuccessPanel,
}

impl ElementId {
    pub const ALL: [ElementId; 12] = [
        ElementId::Days,
        ElementId::Hours,
        ElementId::Minutes,
        ElementId::Seconds,
        ElementId::CountdownHeading,
        ElementId::RsvpForm,
        ElementId::GuestName,
        ElementId::GuestCount,
        ElementId::ContactInfo,
        ElementId::DietaryPreferences,
        ElementId::SubmitButton,
        ElementId::SuccessPanel,
    ];

    /// Elements the countdown cannot run without.
    pub const COUNTDOWN: [ElementId; 5] = [
        ElementId::Days,
        ElementId::Hours,
        ElementId::Minutes,
        ElementId::Seconds,
        ElementId::CountdownHeading,
    ];

    /// Elements the RSVP form cannot run without.
    pub const RSVP: [ElementId; 7] = [
        ElementId::RsvpForm,
        ElementId::GuestName,
        ElementId::GuestCount,
        ElementId::ContactInfo,
        ElementId::DietaryPreferences,
        ElementId::SubmitButton,
        ElementId::SuccessPanel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::Days => "days",
            ElementId::Hours => "hours",
            ElementId::Minutes => "minutes",
            ElementId::Seconds => "seconds",
            ElementId::CountdownHeading => "countdown-heading",
            ElementId::RsvpForm => "rsvp-form",
            ElementId::GuestName => "guest-name",
            ElementId::GuestCount => "guest-count",
            ElementId::ContactInfo => "contact-info",
            ElementId::DietaryPreferences => "dietary-preferences",
            ElementId::SubmitButton => "rsvp-submit",
            ElementId::SuccessPanel => "rsvp-success",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TimeUnit> for ElementId {
    fn from(unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Days => ElementId::Days,
            TimeUnit::Hours => ElementId::Hours,
            TimeUnit::Minutes => ElementId::Minutes,
            TimeUnit::Seconds => ElementId::Seconds,
        }
    }
}

impl From<FormField> for ElementId {
    fn from(field: FormField) -> Self {
        match field {
            FormField::GuestName => ElementId::GuestName,
            FormField::GuestCount => ElementId::GuestCount,
            FormField::ContactInfo => ElementId::ContactInfo,
            FormField::DietaryPreferences => ElementId::DietaryPreferences,
        }
    }
}
