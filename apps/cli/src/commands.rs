//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use pitchmatch_core::{MatchRunConfig, MatchRunResult, ProgressReporter, run_match};
use pitchmatch_reasoner::{ReasonerClient, classify};
use pitchmatch_shared::{
    AppConfig, BrowserSettings, ReasonerSettings, init_config, load_config, resolve_api_key,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// PitchMatch — match a startup pitch against VC investors.
#[derive(Parser)]
#[command(
    name = "pitchmatch",
    version,
    about = "Scrape investor profiles and score them against a startup pitch.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the full pipeline: classify the pitch, evaluate every investor,
    /// write the combined results.
    #[command(name = "match")]
    Match {
        /// Pitch text file (defaults to the configured path).
        #[arg(long)]
        pitch: Option<String>,

        /// Investor spreadsheet (defaults to the configured path).
        #[arg(long)]
        csv: Option<String>,

        /// Output file (defaults to the configured path).
        #[arg(short, long)]
        out: Option<String>,

        /// OpenVC profile URL (repeatable; overrides config when given).
        #[arg(long = "openvc")]
        openvc_urls: Vec<String>,

        /// Signal NFX profile URL (repeatable; overrides config when given).
        #[arg(long = "signal")]
        signal_urls: Vec<String>,
    },

    /// Classify the pitch into focus tags and print them.
    Classify {
        /// Pitch text file (defaults to the configured path).
        #[arg(long)]
        pitch: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "pitchmatch=info",
        1 => "pitchmatch=debug",
        _ => "pitchmatch=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Match {
            pitch,
            csv,
            out,
            openvc_urls,
            signal_urls,
        } => {
            cmd_match(
                pitch.as_deref(),
                csv.as_deref(),
                out.as_deref(),
                &openvc_urls,
                &signal_urls,
            )
            .await
        }
        Command::Classify { pitch } => cmd_classify(pitch.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Build the reasoner client from config + environment.
fn reasoner_client(config: &AppConfig) -> Result<ReasonerClient> {
    let api_key = resolve_api_key(config)?;
    let settings = ReasonerSettings {
        base_url: config.reasoner.base_url.clone(),
        api_key,
        timeout_secs: config.reasoner.timeout_secs,
    };
    Ok(ReasonerClient::new(&settings)?)
}

/// Parse a list of URL strings, failing on the first invalid one.
fn parse_urls(urls: &[String]) -> Result<Vec<Url>> {
    urls.iter()
        .map(|u| Url::parse(u).map_err(|e| eyre!("invalid URL '{u}': {e}")))
        .collect()
}

async fn cmd_match(
    pitch: Option<&str>,
    csv: Option<&str>,
    out: Option<&str>,
    openvc_urls: &[String],
    signal_urls: &[String],
) -> Result<()> {
    let config = load_config()?;

    // Validate the credential before doing anything
    let reasoner = reasoner_client(&config)?;

    // CLI URL lists override config lists when non-empty
    let openvc = if openvc_urls.is_empty() {
        parse_urls(&config.sources.openvc_urls)?
    } else {
        parse_urls(openvc_urls)?
    };
    let signal = if signal_urls.is_empty() {
        parse_urls(&config.sources.signal_urls)?
    } else {
        parse_urls(signal_urls)?
    };

    let run_config = MatchRunConfig {
        pitch_path: PathBuf::from(pitch.unwrap_or(&config.inputs.pitch_path)),
        openvc_urls: openvc,
        signal_urls: signal,
        investor_csv: PathBuf::from(csv.unwrap_or(&config.inputs.investor_csv)),
        output_path: PathBuf::from(out.unwrap_or(&config.inputs.output_path)),
        browser: BrowserSettings::from(&config),
    };

    info!(
        pitch = %run_config.pitch_path.display(),
        openvc = run_config.openvc_urls.len(),
        signal = run_config.signal_urls.len(),
        "starting match run"
    );

    let reporter = CliProgress::new();
    let result = run_match(&run_config, &reasoner, &reporter).await?;

    // Print summary
    println!();
    println!("  Match run complete!");
    println!("  Focus:   {}", result.focus_tags.join(", "));
    println!("  Matched: {}", result.matched);
    println!("  Skipped: {}", result.skipped);
    println!("  Output:  {}", result.output_path.display());
    println!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_classify(pitch: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let reasoner = reasoner_client(&config)?;

    let pitch_path = PathBuf::from(pitch.unwrap_or(&config.inputs.pitch_path));
    let pitch_text = std::fs::read_to_string(&pitch_path)
        .map_err(|e| eyre!("cannot read pitch '{}': {e}", pitch_path.display()))?;

    let tags = classify(&reasoner, &pitch_text).await?;

    if tags.is_empty() {
        println!("No focus areas detected.");
    } else {
        println!("Focus areas detected: {}", tags.join(", "));
    }

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn investor_evaluated(&self, label: &str, matched: usize, skipped: usize) {
        self.spinner.set_message(format!(
            "Matched [{matched} ok / {skipped} skipped] {label}"
        ));
    }

    fn done(&self, _result: &MatchRunResult) {
        self.spinner.finish_and_clear();
    }
}
