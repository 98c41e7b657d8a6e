//! The shared browsing session.
//!
//! One harvest run owns exactly one browser session with one open tab, and
//! every component that needs the page declares the capability it uses
//! through the [`PageSession`] trait instead of reaching into a global:
//!
//! - `navigate`: load a URL and wait for a load condition
//! - `content`: the current rendered document's HTML
//! - `probe_selector`: bounded wait for an element to appear
//! - `click_and_settle`: trigger a control and wait for the page to settle
//! - `fetch_bytes`: fetch a raw resource (article images)
//!
//! [`ChromeSession`] is the production implementation on top of a headless
//! Chrome instance; tests drive the pipeline with a scripted fake instead,
//! so nothing below `main` ever requires a browser binary.

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info, instrument};

use crate::error::HarvestError;

/// Load condition a navigation waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// The document reached DOM-ready.
    DomContentLoaded,
    /// The page settled with no requests still in flight.
    NetworkIdle,
}

/// Result of a bounded wait for a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorProbe {
    /// The element appeared within the bound.
    Found,
    /// The session can say definitively that the element is not in the
    /// document.
    Absent,
    /// The bound elapsed while waiting.
    TimedOut,
}

/// Capabilities of the single shared browsing session.
///
/// All operations are issued sequentially; implementations do not need to
/// support concurrent calls.
pub trait PageSession {
    /// Load `url` in the shared browsing context and suspend until `wait`
    /// is satisfied. No retries; a failure surfaces to the caller.
    async fn navigate(&self, url: &str, wait: WaitUntil) -> Result<(), HarvestError>;

    /// The rendered HTML of the current document.
    async fn content(&self) -> Result<String, HarvestError>;

    /// Wait up to `timeout` for an element matching `selector`.
    async fn probe_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<SelectorProbe, HarvestError>;

    /// Click the element matching `selector` and wait for the page to
    /// settle per `settle`.
    async fn click_and_settle(&self, selector: &str, settle: WaitUntil)
    -> Result<(), HarvestError>;

    /// Fetch a raw resource as bytes through the session's HTTP client.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, HarvestError>;
}

/// Production session: a headless Chrome instance plus an HTTP client for
/// raw resource fetches.
///
/// Dropping the session closes the browser process, so cleanup happens on
/// every exit path of the run, including error returns.
pub struct ChromeSession {
    // Keeps the browser process alive for the lifetime of the session.
    _browser: Browser,
    tab: Arc<Tab>,
    http: reqwest::Client,
}

impl ChromeSession {
    /// Launch the browser and open the single tab the run will use.
    #[instrument(level = "info", skip_all)]
    pub fn launch(headless: bool) -> Result<Self, HarvestError> {
        info!(headless, "Launching browser");
        let launch_options = LaunchOptions::default_builder()
            .headless(headless)
            .build()
            .map_err(|e| HarvestError::Setup(format!("browser launch options: {e}")))?;
        let browser = Browser::new(launch_options)
            .map_err(|e| HarvestError::Setup(format!("browser launch: {e}")))?;
        let tab = browser
            .new_tab()
            .map_err(|e| HarvestError::Setup(format!("browser tab: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HarvestError::Setup(format!("http client: {e}")))?;

        Ok(Self {
            _browser: browser,
            tab,
            http,
        })
    }
}

impl PageSession for ChromeSession {
    async fn navigate(&self, url: &str, wait: WaitUntil) -> Result<(), HarvestError> {
        debug!(%url, ?wait, "Navigating");
        // headless_chrome exposes a single navigated signal; both wait
        // conditions ride on it.
        self.tab
            .navigate_to(url)
            .map_err(|e| HarvestError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| HarvestError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn content(&self) -> Result<String, HarvestError> {
        self.tab
            .get_content()
            .map_err(|e| HarvestError::Extraction(format!("reading page content: {e}")))
    }

    async fn probe_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<SelectorProbe, HarvestError> {
        // The wait polls until the bound elapses. With a positive bound an
        // elapsed wait stays indeterminate, since an overlay may still be
        // injected later; a zero bound is an instantaneous presence check,
        // so its miss is definitive.
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(_) => Ok(SelectorProbe::Found),
            Err(e) if timeout.is_zero() => {
                debug!(%selector, error = %e, "Selector not in the document");
                Ok(SelectorProbe::Absent)
            }
            Err(e) => {
                debug!(%selector, error = %e, "Selector wait elapsed");
                Ok(SelectorProbe::TimedOut)
            }
        }
    }

    async fn click_and_settle(&self, selector: &str, settle: WaitUntil) -> Result<(), HarvestError> {
        debug!(%selector, ?settle, "Clicking");
        let element = self
            .tab
            .find_element(selector)
            .map_err(|e| HarvestError::Extraction(format!("locating {selector}: {e}")))?;
        element
            .click()
            .map_err(|e| HarvestError::Extraction(format!("clicking {selector}: {e}")))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| HarvestError::Extraction(format!("settling after {selector}: {e}")))?;
        Ok(())
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, HarvestError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| HarvestError::ImageFetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::ImageFetch {
                url: url.to_string(),
                message: format!("http status {status}"),
            });
        }
        let bytes = response.bytes().await.map_err(|e| HarvestError::ImageFetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        info!("Browser session released");
    }
}
