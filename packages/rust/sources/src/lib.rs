//! Source adapters: one per investor-data origin.
//!
//! This crate provides:
//! - [`openvc`] — static-page scraper for OpenVC profiles
//! - [`signal`] — browser-driven scraper for Signal NFX profiles
//! - [`sheet`] — eager CSV reader for local investor lists
//!
//! Every adapter normalizes its origin into an
//! [`InvestorRecord`](pitchmatch_shared::InvestorRecord) at the boundary, so
//! the rest of the pipeline never sees raw HTML or CSV rows.

pub mod openvc;
pub mod sheet;
pub mod signal;

use std::time::Duration;

use reqwest::Client;

use pitchmatch_shared::{PitchMatchError, Result};

/// User-Agent string for scrape requests.
const USER_AGENT: &str = concat!("PitchMatch/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by static-page fetches.
///
/// Constructed once by the orchestrator and passed into [`openvc::fetch`].
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| PitchMatchError::config(format!("failed to build HTTP client: {e}")))
}
