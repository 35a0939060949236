//! Notification Center
//!
//! Transient toast messages pinned to the top-right corner. Each toast has a
//! close button and removes itself after a timeout, whichever comes first.
//! The stylesheet is injected into `<head>` once per page.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use web_sys::{Document, Element};

use crate::dom;
use crate::error::{DashboardError, DashboardResult};

/// Id of the injected `<style>` element
pub const STYLE_ELEMENT_ID: &str = "dashboard-notification-styles";

pub const NOTIFICATION_SELECTOR: &str = ".notification";

pub const NOTIFICATION_STYLES: &str = r#"
.notification {
    position: fixed;
    top: 20px;
    right: 20px;
    background: white;
    padding: 1rem 1.5rem;
    border-radius: 8px;
    box-shadow: 0 4px 20px rgba(0,0,0,0.15);
    display: flex;
    align-items: center;
    gap: 0.5rem;
    z-index: 1000;
    animation: slideIn 0.3s ease;
}

.notification-success {
    border-left: 4px solid #27ae60;
}

.notification-error {
    border-left: 4px solid #e74c3c;
}

.notification-info {
    border-left: 4px solid #3498db;
}

.notification button {
    background: none;
    border: none;
    font-size: 1.2rem;
    cursor: pointer;
    margin-left: 0.5rem;
}

@keyframes slideIn {
    from {
        transform: translateX(100%);
        opacity: 0;
    }
    to {
        transform: translateX(0);
        opacity: 1;
    }
}
"#;

/// Notification category; controls icon and accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    /// Font Awesome classes for the leading icon
    pub fn icon_class(&self) -> &'static str {
        match self {
            Severity::Info => "fas fa-info-circle",
            Severity::Success => "fas fa-check-circle",
            Severity::Error => "fas fa-exclamation-triangle",
        }
    }

    /// Class attribute of the toast element
    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.as_str())
    }

    /// Parse an optional tag, falling back to `Info` for missing or unknown
    /// values
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::parse::<Severity>) {
            Some(Ok(severity)) => severity,
            Some(Err(e)) => {
                tracing::debug!("{}, using info", e);
                Severity::Info
            }
            None => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "error" => Ok(Severity::Error),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

type Registry = RefCell<Vec<Rc<Toast>>>;

/// Creates toasts and tracks the ones still on screen
pub struct NotificationCenter {
    document: Document,
    timeout_ms: u32,
    active: Rc<Registry>,
}

impl NotificationCenter {
    pub fn new(document: Document, timeout_ms: u32) -> Self {
        Self {
            document,
            timeout_ms,
            active: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Inject the stylesheet unless the page already has it. Returns `true`
    /// if it was added by this call.
    pub fn install_styles(&self) -> DashboardResult<bool> {
        if self.document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
            return Ok(false);
        }

        let style = self.document.create_element("style")?;
        style.set_id(STYLE_ELEMENT_ID);
        style.set_text_content(Some(NOTIFICATION_STYLES));

        let head = self
            .document
            .head()
            .ok_or(DashboardError::Unavailable("document.head"))?;
        head.append_child(&style)?;
        Ok(true)
    }

    /// Show a toast and schedule its removal
    pub fn notify(&self, message: &str, severity: Severity) -> DashboardResult<NotificationHandle> {
        self.install_styles()?;

        let element = self.build_element(message, severity)?;
        dom::body(&self.document)?.append_child(&element)?;

        let toast = Rc::new(Toast {
            element,
            dismissed: Cell::new(false),
            close_listener: RefCell::new(None),
            timeout: RefCell::new(None),
            registry: Rc::downgrade(&self.active),
        });

        if let Some(button) = dom::query_one(&toast.element, "button") {
            let weak = Rc::downgrade(&toast);
            let listener = EventListener::new(&button, "click", move |_event| {
                if let Some(toast) = weak.upgrade() {
                    toast.dismiss();
                }
            });
            *toast.close_listener.borrow_mut() = Some(listener);
        }

        let weak = Rc::downgrade(&toast);
        let timeout = Timeout::new(self.timeout_ms, move || {
            if let Some(toast) = weak.upgrade() {
                toast.dismiss();
            }
        });
        *toast.timeout.borrow_mut() = Some(timeout);

        self.active.borrow_mut().push(Rc::clone(&toast));
        tracing::debug!("Showing {} notification", severity);

        Ok(NotificationHandle { toast })
    }

    /// Number of toasts currently on screen
    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    /// Dismiss every toast
    pub fn clear(&self) {
        let toasts: Vec<Rc<Toast>> = self.active.borrow_mut().drain(..).collect();
        for toast in toasts {
            toast.dismiss();
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    fn build_element(&self, message: &str, severity: Severity) -> DashboardResult<Element> {
        let container = self.document.create_element("div")?;
        container.set_class_name(&severity.class_name());
        container.set_attribute("role", "status")?;

        let icon = self.document.create_element("i")?;
        icon.set_class_name(severity.icon_class());
        container.append_child(&icon)?;

        // Text only; messages are never parsed as markup.
        let text = self.document.create_element("span")?;
        text.set_text_content(Some(message));
        container.append_child(&text)?;

        let close = self.document.create_element("button")?;
        close.set_attribute("type", "button")?;
        close.set_attribute("aria-label", "Dismiss")?;
        close.set_text_content(Some("\u{00d7}"));
        container.append_child(&close)?;

        Ok(container)
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.clear();
    }
}

struct Toast {
    element: Element,
    dismissed: Cell<bool>,
    close_listener: RefCell<Option<EventListener>>,
    timeout: RefCell<Option<Timeout>>,
    registry: Weak<Registry>,
}

impl Toast {
    fn dismiss(&self) {
        if self.dismissed.replace(true) {
            return;
        }

        self.element.remove();

        let listener = self.close_listener.take();
        let timeout = self.timeout.take();
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .retain(|toast| !std::ptr::eq(Rc::as_ptr(toast), self));
        }
        drop(listener);
        drop(timeout);
    }
}

/// Caller's handle on a shown toast
#[derive(Clone)]
pub struct NotificationHandle {
    toast: Rc<Toast>,
}

impl NotificationHandle {
    /// Remove the toast now. Dismissing twice is a no-op.
    pub fn dismiss(&self) {
        self.toast.dismiss();
    }

    pub fn is_dismissed(&self) -> bool {
        self.toast.dismissed.get()
    }

    pub fn element(&self) -> &Element {
        &self.toast.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_styling() {
        assert_eq!(Severity::Success.class_name(), "notification notification-success");
        assert_eq!(Severity::Success.icon_class(), "fas fa-check-circle");
        assert_eq!(Severity::Error.icon_class(), "fas fa-exclamation-triangle");
        assert_eq!(Severity::default().icon_class(), "fas fa-info-circle");
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("success".parse::<Severity>().unwrap(), Severity::Success);
        assert_eq!(" ERROR ".parse::<Severity>().unwrap(), Severity::Error);

        let err = "warning".parse::<Severity>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown severity: warning");

        assert_eq!(Severity::from_tag(None), Severity::Info);
        assert_eq!(Severity::from_tag(Some("warning")), Severity::Info);
        assert_eq!(Severity::from_tag(Some("error")), Severity::Error);
    }

    #[test]
    fn test_stylesheet_covers_every_severity() {
        for severity in [Severity::Info, Severity::Success, Severity::Error] {
            let rule = format!(".notification-{}", severity);
            assert!(NOTIFICATION_STYLES.contains(&rule), "missing {}", rule);
        }
        assert!(NOTIFICATION_STYLES.contains("@keyframes slideIn"));
    }
}
