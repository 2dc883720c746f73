//! Application configuration for PitchMatch.
//!
//! User config lives at `~/.pitchmatch/pitchmatch.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PitchMatchError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "pitchmatch.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".pitchmatch";

// ---------------------------------------------------------------------------
// Config structs (matching pitchmatch.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input/output file paths.
    #[serde(default)]
    pub inputs: InputsConfig,

    /// Reasoning API settings.
    #[serde(default)]
    pub reasoner: ReasonerConfig,

    /// Investor profile URL lists.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Headless browser settings.
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// `[inputs]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    /// Path to the plain-text startup pitch.
    #[serde(default = "default_pitch_path")]
    pub pitch_path: String,

    /// Path to the investor spreadsheet (CSV with a header row).
    #[serde(default = "default_investor_csv")]
    pub investor_csv: String,

    /// Path the combined match results are written to.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            pitch_path: default_pitch_path(),
            investor_csv: default_investor_csv(),
            output_path: default_output_path(),
        }
    }
}

fn default_pitch_path() -> String {
    "sample_pitch.txt".into()
}
fn default_investor_csv() -> String {
    "vc_list_enriched.csv".into()
}
fn default_output_path() -> String {
    "vc_match_results.json".into()
}

/// `[reasoner]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonerConfig {
    /// Base URL of the reasoning API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.alchemyst.ai".into()
}
fn default_api_key_env() -> String {
    "ALCHEMYST_API_KEY".into()
}
fn default_timeout_secs() -> u64 {
    60
}

/// `[sources]` section — investor profile URLs visited each run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// OpenVC profile URLs (static HTML).
    #[serde(default)]
    pub openvc_urls: Vec<String>,

    /// Signal NFX profile URLs (client-side rendered).
    #[serde(default)]
    pub signal_urls: Vec<String>,
}

/// `[browser]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Explicit Chromium executable path; auto-discovered when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<String>,

    /// Navigation timeout in milliseconds.
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            navigation_timeout_ms: default_navigation_timeout_ms(),
        }
    }
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

// ---------------------------------------------------------------------------
// Runtime settings (merged from config + CLI flags + environment)
// ---------------------------------------------------------------------------

/// Runtime reasoning-API settings with the credential already resolved.
///
/// Constructed once by the app and injected into the client — business logic
/// never reads the environment itself.
#[derive(Debug, Clone)]
pub struct ReasonerSettings {
    /// Base URL of the reasoning API.
    pub base_url: String,
    /// Bearer credential.
    pub api_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Runtime browser settings.
#[derive(Debug, Clone, Default)]
pub struct BrowserSettings {
    /// Explicit Chromium executable path; auto-discovered when unset.
    pub chrome_path: Option<PathBuf>,
    /// Navigation timeout in milliseconds.
    pub navigation_timeout_ms: u64,
}

impl From<&AppConfig> for BrowserSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            chrome_path: config.browser.chrome_path.as_ref().map(PathBuf::from),
            navigation_timeout_ms: config.browser.navigation_timeout_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.pitchmatch/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PitchMatchError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.pitchmatch/pitchmatch.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PitchMatchError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PitchMatchError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PitchMatchError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PitchMatchError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PitchMatchError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the reasoning API key env var is set and non-empty.
pub fn validate_api_key(config: &AppConfig) -> Result<()> {
    resolve_api_key(config).map(|_| ())
}

/// Read the reasoning API credential from the configured env var.
pub fn resolve_api_key(config: &AppConfig) -> Result<String> {
    let var_name = &config.reasoner.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(PitchMatchError::config(format!(
            "reasoning API key not found. Set the {var_name} environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("pitch_path"));
        assert!(toml_str.contains("ALCHEMYST_API_KEY"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.inputs.output_path, "vc_match_results.json");
        assert_eq!(parsed.reasoner.api_key_env, "ALCHEMYST_API_KEY");
        assert_eq!(parsed.browser.navigation_timeout_ms, 30_000);
    }

    #[test]
    fn config_with_source_urls() {
        let toml_str = r#"
[inputs]
pitch_path = "/tmp/pitch.txt"

[sources]
openvc_urls = ["https://www.openvc.app/investor/sarah-guo"]
signal_urls = ["https://signal.nfx.com/investor/aaron-harris"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.inputs.pitch_path, "/tmp/pitch.txt");
        assert_eq!(config.sources.openvc_urls.len(), 1);
        assert_eq!(config.sources.signal_urls.len(), 1);
        // Unset sections fall back to defaults.
        assert_eq!(config.reasoner.base_url, "https://api.alchemyst.ai");
    }

    #[test]
    fn browser_settings_from_app_config() {
        let mut config = AppConfig::default();
        config.browser.chrome_path = Some("/usr/bin/chromium".into());
        let settings = BrowserSettings::from(&config);
        assert_eq!(settings.chrome_path.as_deref(), Some(Path::new("/usr/bin/chromium")));
        assert_eq!(settings.navigation_timeout_ms, 30_000);
    }

    #[test]
    fn api_key_validation() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.reasoner.api_key_env = "PM_TEST_NONEXISTENT_KEY_12345".into();
        let result = validate_api_key(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key not found"));
    }
}
