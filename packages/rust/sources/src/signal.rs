//! Browser-driven scraper for Signal NFX investor profiles.
//!
//! Signal pages are client-side rendered, so a plain GET returns an empty
//! shell. Each fetch launches an isolated headless Chromium session via
//! chromiumoxide, waits for navigation to settle, reads the rendered DOM,
//! and tears the session down before returning — on every exit path.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use pitchmatch_shared::{BrowserSettings, InvestorRecord, PitchMatchError, Result, Source};

/// Env var overriding Chromium discovery.
const CHROME_ENV: &str = "PITCHMATCH_CHROME";

/// Fetch one Signal NFX profile with a scoped headless browser session.
///
/// Launch failure and navigation timeout fail with a fetch error carrying
/// the URL. The browser session is closed before any error propagates.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_rendered(settings: &BrowserSettings, url: &Url) -> Result<InvestorRecord> {
    let config = browser_config(settings)
        .map_err(|e| PitchMatchError::fetch(url.as_str(), e))?;

    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| PitchMatchError::fetch(url.as_str(), format!("browser launch failed: {e}")))?;

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            let _ = event;
        }
    });

    // Session scope: whatever render_page returns, the browser process is
    // shut down before the result is inspected.
    let html = render_page(&browser, url, settings.navigation_timeout_ms).await;

    let _ = browser.close().await;
    let _ = browser.wait().await;
    handler_task.abort();

    let record = extract_rendered_profile(&html?);
    debug!(name = %record.name, has_contact = record.contact.is_some(), "profile rendered");
    Ok(record)
}

/// Navigate and return the rendered document HTML.
async fn render_page(browser: &Browser, url: &Url, timeout_ms: u64) -> Result<String> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| PitchMatchError::fetch(url.as_str(), format!("failed to open page: {e}")))?;

    let navigation =
        tokio::time::timeout(Duration::from_millis(timeout_ms), page.goto(url.as_str())).await;

    match navigation {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            return Err(PitchMatchError::fetch(
                url.as_str(),
                format!("navigation failed: {e}"),
            ));
        }
        Err(_) => {
            return Err(PitchMatchError::fetch(
                url.as_str(),
                format!("navigation timed out after {timeout_ms}ms"),
            ));
        }
    }

    // Let in-flight requests settle before reading the DOM.
    let _ = page.wait_for_navigation().await;

    page.content()
        .await
        .map_err(|e| PitchMatchError::fetch(url.as_str(), format!("failed to read rendered DOM: {e}")))
}

/// Extract an investor record from rendered Signal profile HTML.
///
/// `name` = first H1, `bio` = element with class `bio` (falling back to the
/// literal "No bio available"), `contact` = first hyperlink whose resolved
/// URL uses the mailto scheme.
pub(crate) fn extract_rendered_profile(html: &str) -> InvestorRecord {
    let doc = Html::parse_document(html);

    let h1_sel = Selector::parse("h1").unwrap();
    let name = doc
        .select(&h1_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let bio_sel = Selector::parse(".bio").unwrap();
    let bio = doc
        .select(&bio_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No bio available".to_string());

    let link_sel = Selector::parse("a[href]").unwrap();
    let contact = doc
        .select(&link_sel)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| Url::parse(href).ok())
        .find(|href| href.scheme() == "mailto")
        .map(|href| href.path().to_string());

    InvestorRecord {
        name,
        bio,
        contact,
        ..InvestorRecord::new(Source::SignalNfx)
    }
}

/// Build the headless browser configuration.
fn browser_config(settings: &BrowserSettings) -> std::result::Result<BrowserConfig, String> {
    let mut builder = BrowserConfig::builder()
        .arg("--headless=new")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-extensions");

    if let Some(path) = chromium_executable(settings) {
        builder = builder.chrome_executable(path);
    }

    builder
        .build()
        .map_err(|e| format!("failed to build browser config: {e}"))
}

/// Find the Chromium binary: explicit config, env override, then PATH.
/// `None` lets chromiumoxide fall back to its own detection.
fn chromium_executable(settings: &BrowserSettings) -> Option<PathBuf> {
    if let Some(path) = &settings.chrome_path {
        return Some(path.clone());
    }

    if let Ok(p) = std::env::var(CHROME_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    None
}
