//! Dashboard
//!
//! Composition root. Starts every component against the current page and
//! keeps their handles; tearing the dashboard down unwires all of them.

use std::cell::RefCell;

use web_sys::Window;

use crate::components::{
    FieldValidator, FormGuard, HoverLift, NotificationCenter, NotificationHandle, RevealOnScroll,
    Severity, SmoothScroller, StatusPoller,
};
use crate::config::DashboardConfig;
use crate::dom;
use crate::error::{DashboardError, DashboardResult};

/// All components wired onto one page
pub struct Dashboard {
    config: DashboardConfig,
    smooth_scroller: SmoothScroller,
    form_guard: FormGuard,
    hover_lift: HoverLift,
    field_validator: FieldValidator,
    reveal: Option<RevealOnScroll>,
    poller: Option<StatusPoller>,
    notifications: NotificationCenter,
}

impl Dashboard {
    /// Wire every component onto the window's document
    pub fn start(window: &Window, config: DashboardConfig) -> DashboardResult<Self> {
        let document = window
            .document()
            .ok_or(DashboardError::Unavailable("document"))?;

        let smooth_scroller = SmoothScroller::attach(&document, &document)?;
        let form_guard = FormGuard::attach(&document, &config.busy_label)?;
        let poller = StatusPoller::start(window, &config)?;
        let hover_lift = HoverLift::attach(&document)?;
        let field_validator = FieldValidator::attach(&document)?;

        // Older browsers lack IntersectionObserver; cards then stay as rendered.
        let reveal = match RevealOnScroll::attach(
            &document,
            config.reveal_threshold,
            &config.reveal_root_margin,
        ) {
            Ok(reveal) => Some(reveal),
            Err(e) => {
                tracing::warn!("Reveal on scroll disabled: {}", e);
                None
            }
        };

        let notifications = NotificationCenter::new(document, config.notification_timeout_ms);
        notifications.install_styles()?;

        tracing::info!(
            anchors = smooth_scroller.len(),
            forms = form_guard.len(),
            buttons = hover_lift.len(),
            controls = field_validator.len(),
            cards = reveal.as_ref().map(|r| r.len()).unwrap_or(0),
            polling = poller.is_some(),
            "Dashboard started"
        );

        Ok(Self {
            config,
            smooth_scroller,
            form_guard,
            hover_lift,
            field_validator,
            reveal,
            poller,
            notifications,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().map(|p| p.is_running()).unwrap_or(false)
    }

    pub fn cards_revealed(&self) -> usize {
        self.reveal.as_ref().map(|r| r.revealed()).unwrap_or(0)
    }

    /// Stop the poller, disconnect the observer, remove every listener and
    /// toast.
    pub fn teardown(mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
        self.notifications.clear();
        tracing::info!(
            anchors = self.smooth_scroller.len(),
            forms = self.form_guard.len(),
            buttons = self.hover_lift.len(),
            controls = self.field_validator.len(),
            "Dashboard torn down"
        );
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<Dashboard>> = const { RefCell::new(None) };
    static STANDALONE_NOTIFICATIONS: RefCell<Option<NotificationCenter>> = const { RefCell::new(None) };
}

/// Make `dashboard` the page's active dashboard, tearing down any previous one
pub fn install(dashboard: Dashboard) {
    let previous = ACTIVE.with(|slot| slot.borrow_mut().replace(dashboard));
    if let Some(previous) = previous {
        previous.teardown();
    }
}

/// Tear down the active dashboard and drop any standalone toasts. Returns
/// `false` if no dashboard was running.
pub fn uninstall() -> bool {
    let standalone = STANDALONE_NOTIFICATIONS.with(|slot| slot.borrow_mut().take());
    if let Some(center) = standalone {
        center.clear();
    }

    let previous = ACTIVE.with(|slot| slot.borrow_mut().take());
    match previous {
        Some(dashboard) => {
            dashboard.teardown();
            true
        }
        None => false,
    }
}

pub fn is_running() -> bool {
    ACTIVE.with(|slot| slot.borrow().is_some())
}

/// Show a toast through the active dashboard, or through a page-wide
/// standalone center when none is running
pub fn notify(message: &str, severity: Severity) -> DashboardResult<NotificationHandle> {
    let shown = ACTIVE.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|dashboard| dashboard.notifications().notify(message, severity))
    });
    if let Some(result) = shown {
        return result;
    }

    STANDALONE_NOTIFICATIONS.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            let timeout_ms = DashboardConfig::default().notification_timeout_ms;
            *slot = Some(NotificationCenter::new(dom::document()?, timeout_ms));
        }
        match slot.as_ref() {
            Some(center) => center.notify(message, severity),
            None => Err(DashboardError::Unavailable("notification center")),
        }
    })
}
