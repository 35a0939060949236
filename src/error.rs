//! Dashboard error types
//!
//! Defines the errors that can occur while wiring the page.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

use crate::config::ConfigError;

/// Errors that can occur in the dashboard glue
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A browser global (window, document, body, ...) is missing
    #[error("Browser API unavailable: {0}")]
    Unavailable(&'static str),

    /// A DOM call threw an exception
    #[error("DOM error: {0}")]
    Dom(String),

    /// The HTTP request could not be completed
    #[error("Network error: {0}")]
    Network(#[from] gloo_net::Error),

    /// The server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for DashboardError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        DashboardError::Dom(message)
    }
}

impl From<DashboardError> for JsValue {
    fn from(err: DashboardError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Unavailable("document");
        assert_eq!(err.to_string(), "Browser API unavailable: document");

        let err = DashboardError::Status {
            url: "/plant_status".to_string(),
            status: 502,
        };
        assert_eq!(err.to_string(), "Unexpected status 502 from /plant_status");
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = ConfigError::Parse {
            source_name: "dashboard-config".to_string(),
            error: "expected value".to_string(),
        };
        let err: DashboardError = config_err.into();
        assert!(matches!(err, DashboardError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Failed to parse config dashboard-config: expected value"
        );
    }
}
