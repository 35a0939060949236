//! Smooth Scroller
//!
//! In-page anchors (`href="#..."`) scroll their target into view instead of
//! jumping. The click's default navigation is always suppressed, even when
//! the fragment matches nothing.

use gloo_events::{EventListener, EventListenerOptions};
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom::{self, Selectable};
use crate::error::DashboardResult;

pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

pub struct SmoothScroller {
    listeners: Vec<EventListener>,
}

impl SmoothScroller {
    /// Wire anchors under `root`; targets are looked up in `document`
    pub fn attach(root: &impl Selectable, document: &Document) -> DashboardResult<Self> {
        let anchors: Vec<Element> = dom::query_all(root, ANCHOR_SELECTOR)?;

        let listeners: Vec<EventListener> = anchors
            .into_iter()
            .map(|anchor| {
                let document = document.clone();
                let source = anchor.clone();
                EventListener::new_with_options(
                    &anchor,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        event.prevent_default();
                        if let Some(fragment) = source.get_attribute("href") {
                            scroll_to_fragment(&document, &fragment);
                        }
                    },
                )
            })
            .collect();

        tracing::debug!("Smooth scrolling attached to {} anchors", listeners.len());
        Ok(Self { listeners })
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Smoothly scroll the element matching `fragment` to the top of the
/// viewport. Returns `false` if nothing matches.
pub fn scroll_to_fragment(document: &Document, fragment: &str) -> bool {
    let Some(target) = dom::query_one(document, fragment) else {
        return false;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    true
}
