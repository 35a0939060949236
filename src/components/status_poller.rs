//! Status Poller
//!
//! Keeps the plant status page fresh without a full reload. While running,
//! the poller re-fetches the page on a fixed interval and swaps the inner
//! HTML of one fragment (the plants grid) with the freshly rendered one.
//!
//! Failures are logged and the next tick tries again; there is no backoff.
//! Overlapping requests are not ordered, so the last response to resolve
//! wins.

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, DomParser, SupportedType, Window};

use crate::config::DashboardConfig;
use crate::dom;
use crate::error::{DashboardError, DashboardResult};

/// Whether the poller should run on the current page
pub fn should_poll(pathname: &str, status_route: &str) -> bool {
    pathname == status_route
}

/// Periodic refresh of a page fragment
pub struct StatusPoller {
    route: Rc<str>,
    selector: Rc<str>,
    interval_ms: u32,
    interval: Option<Interval>,
    active: Rc<Cell<bool>>,
}

impl StatusPoller {
    /// Start polling if the window is on the status route
    pub fn start(window: &Window, config: &DashboardConfig) -> DashboardResult<Option<Self>> {
        let pathname = window.location().pathname()?;
        if !should_poll(&pathname, &config.status_route) {
            tracing::debug!("Status polling inactive on {}", pathname);
            return Ok(None);
        }

        Ok(Some(Self::spawn(
            &config.status_route,
            &config.fragment_selector,
            config.poll_interval_ms,
        )))
    }

    /// Start polling `route` unconditionally
    pub fn spawn(route: &str, selector: &str, interval_ms: u32) -> Self {
        let route: Rc<str> = Rc::from(route);
        let selector: Rc<str> = Rc::from(selector);
        let active = Rc::new(Cell::new(true));

        let interval = {
            let route = Rc::clone(&route);
            let selector = Rc::clone(&selector);
            let active = Rc::clone(&active);
            Interval::new(interval_ms, move || {
                let route = Rc::clone(&route);
                let selector = Rc::clone(&selector);
                let active = Rc::clone(&active);
                spawn_local(async move {
                    match refresh(&route, &selector, &active).await {
                        Ok(true) => tracing::debug!("Refreshed {} from {}", selector, route),
                        Ok(false) => {}
                        Err(e) => tracing::warn!("Auto-refresh failed: {}", e),
                    }
                });
            })
        };

        tracing::info!("Polling {} every {} ms", route, interval_ms);

        Self {
            route,
            selector,
            interval_ms,
            interval: Some(interval),
            active,
        }
    }

    /// Cancel the interval. Responses still in flight are discarded.
    pub fn stop(&mut self) {
        self.active.set(false);
        if self.interval.take().is_some() {
            tracing::debug!("Stopped polling {}", self.route);
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One poll cycle. Returns `true` if the fragment was swapped; a response
/// that lands after `active` went false is dropped.
pub async fn refresh(route: &str, selector: &str, active: &Cell<bool>) -> DashboardResult<bool> {
    let html = fetch_page(route).await?;
    if !active.get() {
        tracing::debug!("Discarding late response from {}", route);
        return Ok(false);
    }
    let document = dom::document()?;
    swap_fragment(&document, &html, selector)
}

/// Fetch a page's HTML
pub async fn fetch_page(route: &str) -> DashboardResult<String> {
    let response = Request::get(route).send().await?;

    if !response.ok() {
        return Err(DashboardError::Status {
            url: route.to_string(),
            status: response.status(),
        });
    }

    Ok(response.text().await?)
}

/// Replace the inner HTML of `selector` in `document` with the same
/// fragment parsed out of `html`.
///
/// Returns `false` if either side lacks the fragment.
pub fn swap_fragment(document: &Document, html: &str, selector: &str) -> DashboardResult<bool> {
    let parsed = DomParser::new()?.parse_from_string(html, SupportedType::TextHtml)?;

    let Some(fresh) = dom::query_one(&parsed, selector) else {
        tracing::debug!("Fetched page has no {}", selector);
        return Ok(false);
    };
    let Some(current) = dom::query_one(document, selector) else {
        return Ok(false);
    };

    current.set_inner_html(&fresh.inner_html());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_poll_exact_route_only() {
        assert!(should_poll("/plant_status", "/plant_status"));
        assert!(!should_poll("/plant_status/", "/plant_status"));
        assert!(!should_poll("/", "/plant_status"));
        assert!(!should_poll("/plant_status_old", "/plant_status"));
    }
}
