//! JavaScript exports
//!
//! The module's public surface for page scripts and inline handlers:
//!
//! ```js
//! import init, { start, showNotification, formatNumber } from "./pkg/plant_dashboard.js";
//!
//! await init();
//! start();
//! showNotification(`Watered ${formatNumber(1200)} ml`, "success");
//! ```

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;

use crate::components::Severity;
use crate::config::DashboardConfig;
use crate::dashboard::{self, Dashboard};
use crate::dom;
use crate::logging;
use crate::utils::{self, Debounced};

/// Wire the dashboard onto the current page. Waits for `DOMContentLoaded`
/// if the document is still loading. Calling it again rewires the page.
#[wasm_bindgen(js_name = start)]
pub fn start_dashboard() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = dom::window()?;
    let (config, rejected) = match DashboardConfig::load(&window) {
        Ok(config) => (config, None),
        Err(e) => {
            let mut config = DashboardConfig::default();
            config.apply_storage_overrides(&window);
            (config, Some(e))
        }
    };

    logging::init_logging(&config.log_level);
    if let Some(e) = rejected {
        tracing::warn!("Ignoring page config: {}", e);
    }

    let document = dom::document()?;
    if document.ready_state() == "loading" {
        tracing::debug!("Document still loading, deferring start");
        EventListener::once(&document, "DOMContentLoaded", move |_event| boot(config)).forget();
    } else {
        boot(config);
    }
    Ok(())
}

fn boot(config: DashboardConfig) {
    match dom::window().and_then(|window| Dashboard::start(&window, config)) {
        Ok(started) => dashboard::install(started),
        Err(e) => tracing::error!("Dashboard failed to start: {}", e),
    }
}

/// Unwire the dashboard. Returns `false` if it was not running.
#[wasm_bindgen]
pub fn teardown() -> bool {
    dashboard::uninstall()
}

/// Show a toast. `severity` is `"info"` (default), `"success"` or `"error"`.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, severity: Option<String>) -> Result<(), JsValue> {
    let severity = Severity::from_tag(severity.as_deref());
    dashboard::notify(message, severity)?;
    Ok(())
}

/// Thousands separators for the integer part of a number
#[wasm_bindgen(js_name = formatNumber)]
pub fn format_number(value: f64) -> String {
    utils::format_decimal(value)
}

/// Locale-aware short date for anything `new Date(value)` accepts
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(value: &JsValue) -> String {
    utils::locale_date_string(value)
}

/// Debounce a JavaScript function
#[wasm_bindgen(js_name = debounce)]
pub fn debounce(func: js_sys::Function, wait: u32) -> DebouncedFunction {
    let inner = utils::debounce(
        move |args: Box<[JsValue]>| {
            let args: js_sys::Array = args.iter().collect();
            if let Err(e) = func.apply(&JsValue::NULL, &args) {
                tracing::warn!("Debounced function threw: {:?}", e);
            }
        },
        wait,
    );
    DebouncedFunction { inner }
}

/// Handle returned by `debounce`
#[wasm_bindgen]
pub struct DebouncedFunction {
    inner: Debounced<Box<[JsValue]>>,
}

#[wasm_bindgen]
impl DebouncedFunction {
    /// Schedule the wrapped function with `args`, replacing any pending call
    pub fn call(&self, args: Box<[JsValue]>) {
        self.inner.call(args);
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    #[wasm_bindgen(getter)]
    pub fn pending(&self) -> bool {
        self.inner.is_pending()
    }

    #[wasm_bindgen(getter)]
    pub fn wait(&self) -> u32 {
        self.inner.wait_ms()
    }
}
