//! Consent dialog handling.
//!
//! The listing site wraps itself in a consent manager that injects an
//! overlay shortly after the first page load. The harvest runs a single
//! bounded check for the "do not consent" control right after the listing
//! navigation and clicks it when it shows up. Absence is an expected
//! outcome, not an error, so a site that drops the overlay entirely keeps
//! working without changes here.

use std::time::Duration;

use tracing::{info, instrument};

use crate::error::HarvestError;
use crate::session::{PageSession, SelectorProbe, WaitUntil};

/// What the one-shot consent check observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentOutcome {
    /// The control appeared, was clicked, and the page settled.
    Dismissed,
    /// The session reported the control definitively absent.
    NotPresent,
    /// The bounded wait elapsed without the control appearing.
    TimedOut,
}

/// Wait up to `timeout` for the consent control and dismiss the dialog if
/// it appears.
///
/// Only the click/settle interaction itself can return an error; callers
/// treat that error as benign and continue the run with the overlay still
/// up.
#[instrument(level = "info", skip_all, fields(selector = %selector))]
pub async fn dismiss_consent_if_present<S: PageSession>(
    session: &S,
    selector: &str,
    timeout: Duration,
) -> Result<ConsentOutcome, HarvestError> {
    info!("Checking for consent popup");
    match session.probe_selector(selector, timeout).await? {
        SelectorProbe::Found => {
            info!("Consent popup found; dismissing");
            // Dismissal triggers a reload of the listing, so wait for the
            // network to go quiet before reading the page.
            session
                .click_and_settle(selector, WaitUntil::NetworkIdle)
                .await?;
            info!("Consent popup dismissed");
            Ok(ConsentOutcome::Dismissed)
        }
        SelectorProbe::Absent => {
            info!("No consent popup in the document");
            Ok(ConsentOutcome::NotPresent)
        }
        SelectorProbe::TimedOut => {
            info!("No consent popup appeared within the wait bound");
            Ok(ConsentOutcome::TimedOut)
        }
    }
}
