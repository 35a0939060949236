//! Form Guard
//!
//! Disables a form's submit button and swaps in a spinner label as soon as
//! the form is submitted. Nothing re-enables the button; the page is expected
//! to navigate away.

use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlFormElement};

use crate::dom::{self, Selectable};
use crate::error::DashboardResult;

pub const FORM_SELECTOR: &str = "form";
pub const SUBMIT_SELECTOR: &str = r#"button[type="submit"]"#;

/// Markup placed inside a busy submit button
pub fn busy_markup(label: &str) -> String {
    format!(r#"<i class="fas fa-spinner fa-spin"></i> {}"#, label)
}

/// Submit listeners for every form under a root
pub struct FormGuard {
    listeners: Vec<EventListener>,
}

impl FormGuard {
    pub fn attach(root: &impl Selectable, busy_label: &str) -> DashboardResult<Self> {
        let markup: Rc<str> = Rc::from(busy_markup(busy_label));
        let forms: Vec<HtmlFormElement> = dom::query_all(root, FORM_SELECTOR)?;

        let listeners: Vec<EventListener> = forms
            .into_iter()
            .map(|form| {
                let markup = Rc::clone(&markup);
                let target = form.clone();
                EventListener::new(&form, "submit", move |_event| {
                    mark_busy(&target, &markup);
                })
            })
            .collect();

        tracing::debug!("Form guard attached to {} forms", listeners.len());
        Ok(Self { listeners })
    }

    /// Number of guarded forms
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Disable the form's submit button. Returns `false` when there is no
/// submit button or it is already busy.
pub fn mark_busy(form: &Element, markup: &str) -> bool {
    let button = dom::query_one(form, SUBMIT_SELECTOR)
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());

    match button {
        Some(button) if !button.disabled() => {
            button.set_disabled(true);
            button.set_inner_html(markup);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_markup() {
        assert_eq!(
            busy_markup("Processing..."),
            r#"<i class="fas fa-spinner fa-spin"></i> Processing..."#
        );
    }
}
