// RSVP form rules: raw form input, field validation and the validated submission.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum trimmed length of a guest name.
pub const MIN_NAME_LEN: usize = 2;
/// Separator-stripped length at which any contact value is accepted.
pub const MIN_CONTACT_LEN: usize = 10;

/// Form fields in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    GuestName,
    GuestCount,
    ContactInfo,
    DietaryPreferences,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::GuestName,
        FormField::GuestCount,
        FormField::ContactInfo,
        FormField::DietaryPreferences,
    ];
}

/// Why a field was rejected. The display text is the inline message shown to
/// the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationReason {
    #[error("Please enter a valid name (at least 2 characters)")]
    TooShort,
    #[error("Please select number of attendees")]
    Missing,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field:?}: {reason}")]
pub struct ValidationError {
    pub field: FormField,
    pub reason: ValidationReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Pass,
    Fail(ValidationError),
}

/// Per-field outcomes of one validation pass, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    outcomes: Vec<(FormField, FieldOutcome)>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn outcome(&self, field: FormField) -> Option<FieldOutcome> {
        self.outcomes
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, outcome)| *outcome)
    }

    pub fn errors(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.outcomes.iter().filter_map(|(_, outcome)| match outcome {
            FieldOutcome::Pass => None,
            FieldOutcome::Fail(error) => Some(*error),
        })
    }

    /// First failing field in document order; it receives input focus.
    pub fn first_failure(&self) -> Option<ValidationError> {
        self.errors().next()
    }
}

/// Attendee option picked from the selection, kept as offered ("2", "5+").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GuestCount(String);

impl GuestCount {
    /// Any non-blank selection counts as made.
    pub fn parse(selection: &str) -> Option<Self> {
        let selection = selection.trim();
        (!selection.is_empty()).then(|| Self(selection.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric headcount when the option is a plain number.
    pub fn headcount(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

/// Raw values read from the form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RsvpForm {
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_count: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub dietary_preferences: Option<String>,
}

impl RsvpForm {
    /// Validates every field and builds the submission when all pass.
    pub fn to_submission(&self) -> Result<RsvpSubmission, ValidationResult> {
        let result = validate(self);
        if !result.is_valid() {
            return Err(result);
        }

        let guest_count = self
            .guest_count
            .as_deref()
            .and_then(GuestCount::parse)
            .ok_or_else(|| result.clone())?;

        Ok(RsvpSubmission {
            guest_name: trimmed(&self.guest_name).to_string(),
            guest_count,
            contact_info: trimmed(&self.contact_info).to_string(),
            dietary_preferences: trimmed(&self.dietary_preferences).to_string(),
        })
    }
}

/// Validated attendance details for a single submit attempt. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsvpSubmission {
    pub guest_name: String,
    pub guest_count: GuestCount,
    pub contact_info: String,
    pub dietary_preferences: String,
}

/// Local acknowledgement of a simulated submission. The timestamp comes from
/// the local clock and nothing is sent anywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub reference: Uuid,
    pub submitted_at: DateTime<Local>,
    pub submission: RsvpSubmission,
}

/// Checks every field; the result always carries one outcome per field.
pub fn validate(form: &RsvpForm) -> ValidationResult {
    let outcomes = FormField::ALL
        .into_iter()
        .map(|field| {
            let outcome = match check_field(form, field) {
                Ok(()) => FieldOutcome::Pass,
                Err(reason) => FieldOutcome::Fail(ValidationError { field, reason }),
            };
            (field, outcome)
        })
        .collect();

    ValidationResult { outcomes }
}

fn check_field(form: &RsvpForm, field: FormField) -> Result<(), ValidationReason> {
    match field {
        FormField::GuestName => {
            if trimmed(&form.guest_name).chars().count() < MIN_NAME_LEN {
                return Err(ValidationReason::TooShort);
            }
        }
        FormField::GuestCount => {
            if form.guest_count.as_deref().and_then(GuestCount::parse).is_none() {
                return Err(ValidationReason::Missing);
            }
        }
        FormField::ContactInfo => {
            let contact = trimmed(&form.contact_info);
            if contact.is_empty() || !is_valid_phone(contact) {
                return Err(ValidationReason::InvalidPhone);
            }
        }
        FormField::DietaryPreferences => {}
    }
    Ok(())
}

/// Accepts a 10-digit Indian mobile number (leading 6-9) once spaces, hyphens
/// and parentheses are stripped. Any stripped value of 10 or more characters
/// is accepted as well.
pub fn is_valid_phone(raw: &str) -> bool {
    let cleaned: String = raw
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect();

    is_indian_mobile(&cleaned) || cleaned.chars().count() >= MIN_CONTACT_LEN
}

fn is_indian_mobile(digits: &str) -> bool {
    digits.len() == 10
        && digits.chars().all(|c| c.is_ascii_digit())
        && matches!(digits.as_bytes().first(), Some(b'6'..=b'9'))
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, count: &str, phone: &str) -> RsvpForm {
        RsvpForm {
            guest_name: Some(name.to_string()),
            guest_count: Some(count.to_string()),
            contact_info: Some(phone.to_string()),
            dietary_preferences: None,
        }
    }

    #[test]
    fn when_all_fields_are_valid_then_every_outcome_passes() {
        let result = validate(&form("Aliya", "2", "9876543210"));

        assert!(result.is_valid());
        for field in FormField::ALL {
            assert_eq!(result.outcome(field), Some(FieldOutcome::Pass));
        }
    }

    #[test]
    fn when_name_is_empty_then_only_name_fails_too_short() {
        let result = validate(&form("", "2", "9876543210"));

        assert!(!result.is_valid());
        assert_eq!(
            result.outcome(FormField::GuestName),
            Some(FieldOutcome::Fail(ValidationError {
                field: FormField::GuestName,
                reason: ValidationReason::TooShort,
            }))
        );
        assert_eq!(result.outcome(FormField::GuestCount), Some(FieldOutcome::Pass));
        assert_eq!(result.outcome(FormField::ContactInfo), Some(FieldOutcome::Pass));
        assert!(form("", "2", "9876543210").to_submission().is_err());
    }

    #[test]
    fn when_name_is_one_character_after_trim_then_it_is_too_short() {
        let result = validate(&form("  A  ", "2", "9876543210"));
        assert_eq!(
            result.first_failure().map(|e| e.reason),
            Some(ValidationReason::TooShort)
        );
    }

    #[test]
    fn when_phone_is_five_digits_then_contact_fails_invalid_phone() {
        let result = validate(&form("Zaid", "2", "12345"));

        assert_eq!(
            result.first_failure(),
            Some(ValidationError {
                field: FormField::ContactInfo,
                reason: ValidationReason::InvalidPhone,
            })
        );
    }

    #[test]
    fn when_count_is_not_selected_then_it_fails_missing() {
        let mut input = form("Zaid", "", "9876543210");
        assert_eq!(
            validate(&input).first_failure().map(|e| e.reason),
            Some(ValidationReason::Missing)
        );

        input.guest_count = None;
        assert!(!validate(&input).is_valid());

        input.guest_count = Some("   ".to_string());
        assert!(!validate(&input).is_valid());
    }

    #[test]
    fn any_offered_option_counts_as_a_selection() {
        for option in ["1", "5+", "11", "two"] {
            let input = form("Zaid", option, "9876543210");

            assert_eq!(
                validate(&input).outcome(FormField::GuestCount),
                Some(FieldOutcome::Pass),
                "option {option:?}"
            );
        }

        let submission = form("Zaid", " 5+ ", "9876543210")
            .to_submission()
            .expect("expected valid submission");
        assert_eq!(submission.guest_count.as_str(), "5+");
        assert_eq!(submission.guest_count.headcount(), None);
    }

    #[test]
    fn every_failing_field_is_reported_in_document_order() {
        let result = validate(&RsvpForm::default());
        let fields: Vec<FormField> = result.errors().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec![FormField::GuestName, FormField::GuestCount, FormField::ContactInfo]
        );
        assert_eq!(result.first_failure().map(|e| e.field), Some(FormField::GuestName));
    }

    #[test]
    fn phone_separators_are_stripped_before_matching() {
        assert!(is_valid_phone("98765 43210"));
        assert!(is_valid_phone("(987) 654-3210"));
        assert!(!is_valid_phone("98765-43"));
    }

    #[test]
    fn phone_fallback_accepts_any_ten_character_value() {
        // Leading digit outside 6-9 and letters still pass on length alone.
        assert!(is_valid_phone("1234567890"));
        assert!(is_valid_phone("call me maybe"));
        assert!(!is_valid_phone("123456789"));
    }

    #[test]
    fn dietary_preferences_never_fail() {
        let mut input = form("Zaid", "3", "9876543210");
        input.dietary_preferences = Some(String::new());
        assert_eq!(
            validate(&input).outcome(FormField::DietaryPreferences),
            Some(FieldOutcome::Pass)
        );
    }

    #[test]
    fn submission_carries_trimmed_values() {
        let mut input = form("  Aliya Khan ", " 4 ", " 9876543210 ");
        input.dietary_preferences = Some(" vegetarian ".to_string());

        let submission = input.to_submission().expect("expected valid submission");

        assert_eq!(submission.guest_name, "Aliya Khan");
        assert_eq!(submission.guest_count.as_str(), "4");
        assert_eq!(submission.guest_count.headcount(), Some(4));
        assert_eq!(submission.contact_info, "9876543210");
        assert_eq!(submission.dietary_preferences, "vegetarian");
    }
}
