//! DOM helpers
//!
//! Thin typed wrappers over `web-sys` lookups.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

use crate::error::{DashboardError, DashboardResult};

/// Nodes that support selector queries
pub trait Selectable {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue>;
    fn select_one(&self, selector: &str) -> Result<Option<Element>, JsValue>;
}

impl Selectable for Document {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }

    fn select_one(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }
}

impl Selectable for Element {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }

    fn select_one(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }
}

pub fn window() -> DashboardResult<Window> {
    web_sys::window().ok_or(DashboardError::Unavailable("window"))
}

pub fn document() -> DashboardResult<Document> {
    window()?
        .document()
        .ok_or(DashboardError::Unavailable("document"))
}

pub fn body(document: &Document) -> DashboardResult<HtmlElement> {
    document.body().ok_or(DashboardError::Unavailable("document.body"))
}

/// All elements under `root` matching `selector` that cast to `T`.
///
/// Elements of another type are skipped.
pub fn query_all<T: JsCast>(root: &impl Selectable, selector: &str) -> DashboardResult<Vec<T>> {
    let list = root.select_all(selector)?;
    let elements = (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect();
    Ok(elements)
}

/// First element matching `selector`.
///
/// An invalid selector is treated like a missing element.
pub fn query_one(root: &impl Selectable, selector: &str) -> Option<Element> {
    match root.select_one(selector) {
        Ok(found) => found,
        Err(e) => {
            tracing::debug!("Selector {:?} rejected: {}", selector, DashboardError::from(e));
            None
        }
    }
}

/// Set a single inline style property
pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> DashboardResult<()> {
    element.style().set_property(property, value)?;
    Ok(())
}
