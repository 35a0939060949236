//! Field Validator
//!
//! Client-side hint for required form controls. A control is flagged
//! `invalid` when it loses focus empty, and unflagged as soon as the user
//! types something. Submission is never blocked.

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom::{self, Selectable};
use crate::error::DashboardResult;

pub const CONTROL_SELECTOR: &str = ".form-control";
pub const INVALID_CLASS: &str = "invalid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

/// Verdict when a control loses focus
pub fn check_on_blur(required: bool, value: &str) -> Validity {
    if required && value.trim().is_empty() {
        Validity::Invalid
    } else {
        Validity::Valid
    }
}

/// Whether typing should clear an existing `invalid` mark
pub fn clears_on_input(marked_invalid: bool, value: &str) -> bool {
    marked_invalid && !value.trim().is_empty()
}

pub struct FieldValidator {
    listeners: Vec<EventListener>,
}

impl FieldValidator {
    pub fn attach(root: &impl Selectable) -> DashboardResult<Self> {
        let controls: Vec<Element> = dom::query_all(root, CONTROL_SELECTOR)?;

        let mut listeners = Vec::with_capacity(controls.len() * 2);
        for control in controls {
            let target = control.clone();
            listeners.push(EventListener::new(&control, "blur", move |_event| {
                validate_on_blur(&target);
            }));

            let target = control.clone();
            listeners.push(EventListener::new(&control, "input", move |_event| {
                recheck_on_input(&target);
            }));
        }

        tracing::debug!("Field validation attached to {} controls", listeners.len() / 2);
        Ok(Self { listeners })
    }

    pub fn len(&self) -> usize {
        self.listeners.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Apply the blur verdict to a control's class list
pub fn validate_on_blur(control: &Element) {
    let Some(value) = control_value(control) else {
        return;
    };
    let classes = control.class_list();
    let result = match check_on_blur(control.has_attribute("required"), &value) {
        Validity::Invalid => classes.add_1(INVALID_CLASS),
        Validity::Valid => classes.remove_1(INVALID_CLASS),
    };
    if let Err(e) = result {
        tracing::debug!("Could not update validity class: {:?}", e);
    }
}

/// Clear the `invalid` mark once the control has content
pub fn recheck_on_input(control: &Element) {
    let Some(value) = control_value(control) else {
        return;
    };
    let classes = control.class_list();
    if clears_on_input(classes.contains(INVALID_CLASS), &value) {
        if let Err(e) = classes.remove_1(INVALID_CLASS) {
            tracing::debug!("Could not clear validity class: {:?}", e);
        }
    }
}

/// Current value of an input, textarea or select
fn control_value(control: &Element) -> Option<String> {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        Some(area.value())
    } else {
        control.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_verdict() {
        assert_eq!(check_on_blur(true, ""), Validity::Invalid);
        assert_eq!(check_on_blur(true, "   \t"), Validity::Invalid);
        assert_eq!(check_on_blur(true, " basil "), Validity::Valid);
        assert_eq!(check_on_blur(false, ""), Validity::Valid);
    }

    #[test]
    fn test_input_clears_only_marked_fields() {
        assert!(clears_on_input(true, "b"));
        assert!(!clears_on_input(true, "  "));
        assert!(!clears_on_input(false, "basil"));
    }
}
