//! # Plant Dashboard
//!
//! Browser-side glue for the server-rendered plant monitoring dashboard,
//! compiled to WebAssembly.
//!
//! ## Features
//!
//! - **Smooth scrolling** for in-page anchors
//! - **Form guard**: submit buttons switch to a spinner and lock on submit
//! - **Live status**: the plant status page refreshes its grid every 30s
//! - **Hover lift** for buttons with tooltips
//! - **Field hints** for required inputs left empty
//! - **Card reveal** as cards scroll into view
//! - **Toast notifications** with auto-dismiss
//!
//! ## Modules
//!
//! - [`components`]: the page behaviors, each owning its listeners and timers
//! - [`dashboard`]: wires every component and tears them down again
//! - [`utils`]: number/date formatting and debounce
//! - [`exports`]: the JavaScript-facing API
//!
//! ## Usage
//!
//! ```js
//! import init, { start } from "./pkg/plant_dashboard.js";
//!
//! await init();
//! start();
//! ```

pub mod components;
pub mod config;
pub mod dashboard;
pub mod dom;
pub mod error;
pub mod exports;
pub mod logging;
pub mod utils;

pub use components::{
    FieldValidator, FormGuard, HoverLift, NotificationCenter, NotificationHandle, RevealOnScroll,
    Severity, SmoothScroller, StatusPoller,
};
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::Dashboard;
pub use error::{DashboardError, DashboardResult};
pub use utils::{debounce, format_date, format_number, Debounced};
