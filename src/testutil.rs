//! Scripted in-memory [`PageSession`] for tests.
//!
//! [`FakeSession`] serves canned documents per URL, canned probe outcomes,
//! and canned image bytes, and records every call so tests can assert on
//! ordering and pacing without a browser.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::HarvestError;
use crate::session::{PageSession, SelectorProbe, WaitUntil};

/// Everything a [`FakeSession`] observed, in call order.
#[derive(Debug, Default)]
pub struct CallLog {
    pub navigations: Vec<(String, WaitUntil)>,
    pub probes: Vec<(String, Duration)>,
    pub clicks: Vec<(String, WaitUntil)>,
    pub fetches: Vec<String>,
    /// URL of the last successful navigation, if any.
    pub current: Option<String>,
}

pub struct FakeSession {
    pages: HashMap<String, String>,
    failing_navigations: HashSet<String>,
    probe_outcome: SelectorProbe,
    click_fails: bool,
    images: HashMap<String, Vec<u8>>,
    calls: Mutex<CallLog>,
}

impl Default for FakeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSession {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            failing_navigations: HashSet::new(),
            probe_outcome: SelectorProbe::TimedOut,
            click_fails: false,
            images: HashMap::new(),
            calls: Mutex::new(CallLog::default()),
        }
    }

    /// Serve `html` for navigations to `url`.
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Fail navigations to `url` even if a page is registered for it.
    pub fn with_failing_navigation(mut self, url: &str) -> Self {
        self.failing_navigations.insert(url.to_string());
        self
    }

    /// Outcome every `probe_selector` call reports.
    pub fn with_probe_outcome(mut self, outcome: SelectorProbe) -> Self {
        self.probe_outcome = outcome;
        self
    }

    /// Make every `click_and_settle` call fail.
    pub fn with_failing_click(mut self) -> Self {
        self.click_fails = true;
        self
    }

    /// Serve `bytes` for fetches of `url`.
    pub fn with_image(mut self, url: &str, bytes: &[u8]) -> Self {
        self.images.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn navigations(&self) -> Vec<(String, WaitUntil)> {
        self.calls.lock().unwrap().navigations.clone()
    }

    pub fn probes(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().probes.clone()
    }

    pub fn clicks(&self) -> Vec<(String, WaitUntil)> {
        self.calls.lock().unwrap().clicks.clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.calls.lock().unwrap().fetches.clone()
    }
}

impl PageSession for FakeSession {
    async fn navigate(&self, url: &str, wait: WaitUntil) -> Result<(), HarvestError> {
        let mut calls = self.calls.lock().unwrap();
        calls.navigations.push((url.to_string(), wait));
        if self.failing_navigations.contains(url) || !self.pages.contains_key(url) {
            calls.current = None;
            return Err(HarvestError::Navigation {
                url: url.to_string(),
                message: "scripted navigation failure".to_string(),
            });
        }
        calls.current = Some(url.to_string());
        Ok(())
    }

    async fn content(&self) -> Result<String, HarvestError> {
        let calls = self.calls.lock().unwrap();
        let current = calls
            .current
            .as_ref()
            .ok_or_else(|| HarvestError::Extraction("no page loaded".to_string()))?;
        Ok(self.pages[current].clone())
    }

    async fn probe_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<SelectorProbe, HarvestError> {
        self.calls
            .lock()
            .unwrap()
            .probes
            .push((selector.to_string(), timeout));
        Ok(self.probe_outcome)
    }

    async fn click_and_settle(&self, selector: &str, settle: WaitUntil) -> Result<(), HarvestError> {
        self.calls
            .lock()
            .unwrap()
            .clicks
            .push((selector.to_string(), settle));
        if self.click_fails {
            return Err(HarvestError::Extraction(format!(
                "scripted click failure on {selector}"
            )));
        }
        Ok(())
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, HarvestError> {
        self.calls.lock().unwrap().fetches.push(url.to_string());
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| HarvestError::ImageFetch {
                url: url.to_string(),
                message: "scripted fetch failure".to_string(),
            })
    }
}
