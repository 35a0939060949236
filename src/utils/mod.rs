//! Utilities
//!
//! Pure helpers shared by the dashboard and exposed to page scripts.

pub mod debounce;
pub mod format;

pub use debounce::{debounce, Debounced, Scheduler, TimeoutScheduler};
pub use format::{format_date, format_decimal, format_number, locale_date_string};
