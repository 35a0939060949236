//! Page Components
//!
//! Independent behaviors wired onto the server-rendered dashboard. Each one
//! owns its listeners, timers or observers; dropping it unwires the page.

pub mod field_validator;
pub mod form_guard;
pub mod hover_lift;
pub mod notifications;
pub mod reveal;
pub mod smooth_scroll;
pub mod status_poller;

pub use field_validator::FieldValidator;
pub use form_guard::FormGuard;
pub use hover_lift::HoverLift;
pub use notifications::{NotificationCenter, NotificationHandle, Severity};
pub use reveal::RevealOnScroll;
pub use smooth_scroll::SmoothScroller;
pub use status_poller::StatusPoller;
