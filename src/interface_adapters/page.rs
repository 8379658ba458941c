// In-memory page model: the element contract both components render into, and
// the adapter that applies render intents to it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};

use crate::domain::{ElementId, FormField, InitError, TimeUnit};
use crate::use_cases::rsvp::DEFAULT_SUBMIT_LABEL;
use crate::use_cases::{RenderIntent, Transition};

pub const CLASS_HIGHLIGHT: &str = "highlight";
pub const CLASS_CELEBRATE: &str = "celebrate";
pub const CLASS_ERROR: &str = "error";
pub const CLASS_GROUP_FOCUSED: &str = "form-group-focused";

pub const DEFAULT_HEADING: &str = "Counting Down to Our Special Day";

/// Display state of a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub text: String,
    pub visible: bool,
    pub disabled: bool,
    pub opacity: f32,
    pub classes: BTreeSet<String>,
    /// Inline error message rendered next to a form control.
    pub error: Option<String>,
    pub transition: Option<Transition>,
}

impl Element {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
            disabled: false,
            opacity: 1.0,
            classes: BTreeSet::new(),
            error: None,
            transition: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageModel {
    elements: BTreeMap<ElementId, Element>,
    focused: Option<ElementId>,
    scrolled_to: Option<ElementId>,
    notice: Option<String>,
}

impl PageModel {
    /// The invitation page as served: every element present, success panel hidden.
    pub fn invitation() -> Self {
        let mut page = Self::default();
        for unit in TimeUnit::ALL {
            page.insert(unit.into(), Element::new("0"));
        }
        page.insert(ElementId::CountdownHeading, Element::new(DEFAULT_HEADING));
        page.insert(ElementId::RsvpForm, Element::new(""));
        for field in FormField::ALL {
            page.insert(field.into(), Element::new(""));
        }
        page.insert(ElementId::SubmitButton, Element::new(DEFAULT_SUBMIT_LABEL));
        page.insert(ElementId::SuccessPanel, Element::new("").hidden());
        page
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.with_element(id, |element| element.visible = visible);
    }

    pub fn insert(&mut self, id: ElementId, element: Element) {
        self.elements.insert(id, element);
    }

    /// Same page with one element missing from the markup.
    pub fn without(mut self, id: ElementId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn require(&self, id: ElementId) -> Result<&Element, InitError> {
        self.element(id).ok_or(InitError::MissingElement(id))
    }

    /// Checks that every listed element exists.
    pub fn require_all(&self, ids: &[ElementId]) -> Result<(), InitError> {
        ids.iter().try_for_each(|id| self.require(*id).map(|_| ()))
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|element| element.text.as_str())
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|element| element.visible)
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn scrolled_to(&self) -> Option<ElementId> {
        self.scrolled_to
    }

    /// Blocking failure notice currently on screen.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// `days:hours:minutes:seconds` as currently displayed.
    pub fn countdown_text(&self) -> String {
        TimeUnit::ALL
            .into_iter()
            .map(|unit| self.text(unit.into()).unwrap_or("-"))
            .collect::<Vec<_>>()
            .join(":")
    }

    pub fn apply(&mut self, intent: &RenderIntent) {
        match intent {
            RenderIntent::SetUnit { unit, value } => {
                self.with_element((*unit).into(), |element| element.text = value.to_string());
            }
            RenderIntent::HighlightUnit { unit, on } => {
                self.with_element((*unit).into(), |element| {
                    toggle_class(element, CLASS_HIGHLIGHT, *on)
                });
            }
            RenderIntent::ShowCompletion { message } => {
                self.with_element(ElementId::CountdownHeading, |element| {
                    element.text = message.clone();
                    element.classes.insert(CLASS_CELEBRATE.to_string());
                });
            }
            RenderIntent::ClearAllErrors => {
                for field in FormField::ALL {
                    self.with_element(field.into(), clear_error);
                }
            }
            RenderIntent::ShowFieldError { field, message } => {
                self.with_element((*field).into(), |element| {
                    element.error = Some(message.clone());
                    element.classes.insert(CLASS_ERROR.to_string());
                });
            }
            RenderIntent::ClearFieldError { field } => {
                self.with_element((*field).into(), clear_error);
            }
            RenderIntent::FocusField { field } => {
                self.focused = Some((*field).into());
            }
            RenderIntent::SetFieldGroupFocused { field, focused } => {
                self.with_element((*field).into(), |element| {
                    toggle_class(element, CLASS_GROUP_FOCUSED, *focused)
                });
            }
            RenderIntent::SetSubmitBusy { label } => {
                self.with_element(ElementId::SubmitButton, |element| {
                    element.disabled = true;
                    element.text = label.clone();
                    element.opacity = 0.7;
                });
            }
            RenderIntent::RestoreSubmit { label } => {
                self.with_element(ElementId::SubmitButton, |element| {
                    element.disabled = false;
                    element.text = label.clone();
                    element.opacity = 1.0;
                });
            }
            RenderIntent::RevealSuccess { transition } => {
                // Swap both regions in one step so the page never settles with
                // both hidden.
                if self.element(ElementId::SuccessPanel).is_none() {
                    debug!("success panel missing; keeping form visible");
                    return;
                }
                self.with_element(ElementId::RsvpForm, |element| element.visible = false);
                self.with_element(ElementId::SuccessPanel, |element| {
                    element.visible = true;
                    element.transition = Some(*transition);
                });
            }
            RenderIntent::ScrollIntoView { element } => {
                self.scrolled_to = Some(*element);
            }
            RenderIntent::ShowFailureNotice { message } => {
                self.notice = Some(message.clone());
            }
            RenderIntent::DismissFailureNotice => {
                self.notice = None;
            }
        }
    }

    fn with_element(&mut self, id: ElementId, update: impl FnOnce(&mut Element)) {
        match self.elements.get_mut(&id) {
            Some(element) => update(element),
            None => debug!(element = %id, "render target missing; intent skipped"),
        }
    }
}

fn toggle_class(element: &mut Element, class: &str, on: bool) {
    if on {
        element.classes.insert(class.to_string());
    } else {
        element.classes.remove(class);
    }
}

fn clear_error(element: &mut Element) {
    element.error = None;
    element.classes.remove(CLASS_ERROR);
}

/// Applies intents to the shared page until every sender is gone.
pub async fn render_task(page: Arc<Mutex<PageModel>>, mut render_rx: mpsc::Receiver<RenderIntent>) {
    while let Some(intent) = render_rx.recv().await {
        let mut page = page.lock().await;
        page.apply(&intent);
        if matches!(
            intent,
            RenderIntent::SetUnit {
                unit: TimeUnit::Seconds,
                ..
            }
        ) {
            debug!(countdown = %page.countdown_text(), "countdown rendered");
        }
        if let RenderIntent::ShowCompletion { message } = &intent {
            info!(%message, "countdown heading replaced");
        }
    }
    debug!("render channel closed; render task exiting");
}
