//! Reveal On Scroll
//!
//! Cards start hidden and slide into place the first time they enter the
//! viewport. Revealing is one-way: a card that scrolls back out stays
//! visible, and its observation is dropped. Revealed cards are marked so a
//! later attach leaves them alone.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::{self, Selectable};
use crate::error::DashboardResult;

pub const CARD_SELECTOR: &str = ".card";

/// Attribute linking a card to its slot in the reveal tracker
pub const REVEAL_INDEX_ATTR: &str = "data-reveal-index";

/// Set on a card once revealed
pub const REVEALED_ATTR: &str = "data-revealed";

pub const HIDDEN_STYLES: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(20px)"),
    ("transition", "opacity 0.6s ease, transform 0.6s ease"),
];

pub const REVEALED_STYLES: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

/// Per-card reveal state. `Revealed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

impl RevealState {
    /// Feed an intersection change; returns `true` only on the transition
    /// to `Revealed`.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        match (*self, intersecting) {
            (RevealState::Hidden, true) => {
                *self = RevealState::Revealed;
                true
            }
            _ => false,
        }
    }
}

/// Reveal states for a fixed set of cards
#[derive(Debug, Default)]
pub struct RevealTracker {
    states: Vec<RevealState>,
}

impl RevealTracker {
    pub fn new(cards: usize) -> Self {
        Self {
            states: vec![RevealState::Hidden; cards],
        }
    }

    /// Record an intersection for card `index`; unknown indices are ignored
    pub fn observe(&mut self, index: usize, intersecting: bool) -> bool {
        self.states
            .get_mut(index)
            .map(|state| state.observe(intersecting))
            .unwrap_or(false)
    }

    pub fn revealed(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == RevealState::Revealed)
            .count()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Intersection observer over every card; disconnects on drop
pub struct RevealOnScroll {
    observer: IntersectionObserver,
    tracker: Rc<RefCell<RevealTracker>>,
    _callback: ObserverCallback,
}

impl RevealOnScroll {
    pub fn attach(root: &impl Selectable, threshold: f64, root_margin: &str) -> DashboardResult<Self> {
        let cards: Vec<HtmlElement> = dom::query_all::<HtmlElement>(root, CARD_SELECTOR)?
            .into_iter()
            .filter(|card| !card.has_attribute(REVEALED_ATTR))
            .collect();
        let tracker = Rc::new(RefCell::new(RevealTracker::new(cards.len())));

        let callback: ObserverCallback = {
            let tracker = Rc::clone(&tracker);
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    on_intersection(&tracker, &observer, &entry);
                }
            })
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for (index, card) in cards.iter().enumerate() {
            card.set_attribute(REVEAL_INDEX_ATTR, &index.to_string())?;
            for (property, value) in HIDDEN_STYLES {
                dom::set_style(card, property, value)?;
            }
            observer.observe(card);
        }

        tracing::debug!("Watching {} cards for reveal", cards.len());
        Ok(Self {
            observer,
            tracker,
            _callback: callback,
        })
    }

    pub fn revealed(&self) -> usize {
        self.tracker.borrow().revealed()
    }

    pub fn len(&self) -> usize {
        self.tracker.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracker.borrow().is_empty()
    }
}

impl Drop for RevealOnScroll {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn on_intersection(
    tracker: &RefCell<RevealTracker>,
    observer: &IntersectionObserver,
    entry: &IntersectionObserverEntry,
) {
    let target = entry.target();
    let Some(index) = target
        .get_attribute(REVEAL_INDEX_ATTR)
        .and_then(|raw| raw.parse::<usize>().ok())
    else {
        return;
    };

    if !tracker.borrow_mut().observe(index, entry.is_intersecting()) {
        return;
    }

    observer.unobserve(&target);
    if let Err(e) = target.set_attribute(REVEALED_ATTR, "") {
        tracing::debug!("Reveal mark failed: {:?}", e);
    }
    if let Some(card) = target.dyn_ref::<HtmlElement>() {
        for (property, value) in REVEALED_STYLES {
            if let Err(e) = dom::set_style(card, property, value) {
                tracing::debug!("Reveal style failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_is_one_way() {
        let mut state = RevealState::default();
        assert!(!state.observe(false));
        assert_eq!(state, RevealState::Hidden);

        assert!(state.observe(true));
        assert_eq!(state, RevealState::Revealed);

        assert!(!state.observe(false));
        assert!(!state.observe(true));
        assert_eq!(state, RevealState::Revealed);
    }

    #[test]
    fn test_tracker_reveals_each_card_once() {
        let mut tracker = RevealTracker::new(3);
        assert!(tracker.observe(1, true));
        assert!(!tracker.observe(1, true));
        assert!(!tracker.observe(2, false));
        assert!(!tracker.observe(7, true));
        assert_eq!(tracker.revealed(), 1);

        assert!(tracker.observe(0, true));
        assert_eq!(tracker.revealed(), 2);
        assert_eq!(tracker.len(), 3);
    }
}
