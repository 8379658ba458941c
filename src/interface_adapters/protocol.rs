// Page event DTOs read by the session event source (one JSON object per line).

use serde::Deserialize;

use crate::domain::{FormField, RsvpForm};

/// Interaction events the page delivers to the RSVP form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PageEvent {
    // The guest typed into a field.
    Edit(FieldRef),
    Focus(FieldRef),
    Blur(FieldRef),
    // Submit control activated with the current field values.
    Submit(RsvpFormDto),
    // Failure notice acknowledged.
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FieldRef {
    pub field: FormField,
}

/// Form values as the page reads them; absent keys mean empty controls.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RsvpFormDto {
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_count: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub dietary_preferences: Option<String>,
}

impl From<RsvpFormDto> for RsvpForm {
    fn from(dto: RsvpFormDto) -> Self {
        Self {
            guest_name: dto.guest_name,
            guest_count: dto.guest_count,
            contact_info: dto.contact_info,
            dietary_preferences: dto.dietary_preferences,
        }
    }
}

pub fn parse_event(line: &str) -> Result<PageEvent, serde_json::Error> {
    serde_json::from_str(line)
}
