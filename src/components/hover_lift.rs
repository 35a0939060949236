//! Hover Lift
//!
//! Buttons that carry a tooltip lift slightly while hovered.

use gloo_events::EventListener;
use web_sys::HtmlElement;

use crate::dom::{self, Selectable};
use crate::error::DashboardResult;

pub const BUTTON_SELECTOR: &str = ".btn";
pub const LIFT_TRANSFORM: &str = "translateY(-2px)";
pub const REST_TRANSFORM: &str = "translateY(0)";

pub struct HoverLift {
    listeners: Vec<EventListener>,
}

impl HoverLift {
    pub fn attach(root: &impl Selectable) -> DashboardResult<Self> {
        let buttons: Vec<HtmlElement> = dom::query_all(root, BUTTON_SELECTOR)?;

        let mut listeners = Vec::new();
        for button in buttons.into_iter().filter(|b| has_tooltip(&b.title())) {
            listeners.push(transform_on(&button, "mouseenter", LIFT_TRANSFORM));
            listeners.push(transform_on(&button, "mouseleave", REST_TRANSFORM));
        }

        tracing::debug!("Hover lift attached to {} buttons", listeners.len() / 2);
        Ok(Self { listeners })
    }

    /// Number of buttons that lift
    pub fn len(&self) -> usize {
        self.listeners.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

pub fn has_tooltip(title: &str) -> bool {
    !title.is_empty()
}

fn transform_on(button: &HtmlElement, event_type: &'static str, transform: &'static str) -> EventListener {
    let target = button.clone();
    EventListener::new(button, event_type, move |_event| {
        if let Err(e) = dom::set_style(&target, "transform", transform) {
            tracing::debug!("Hover transform failed: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tooltip() {
        assert!(has_tooltip("Water now"));
        assert!(has_tooltip(" "));
        assert!(!has_tooltip(""));
    }
}
