//! Shared types, error model, and configuration for PitchMatch.
//!
//! This crate is the foundation depended on by all other PitchMatch crates.
//! It provides:
//! - [`PitchMatchError`] — the unified error type
//! - Domain types ([`InvestorRecord`], [`MatchResult`], [`Source`])
//! - Configuration ([`AppConfig`], [`ReasonerSettings`], [`BrowserSettings`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BrowserConfig, BrowserSettings, InputsConfig, ReasonerConfig, ReasonerSettings,
    SourcesConfig, config_dir, config_file_path, init_config, load_config, load_config_from,
    resolve_api_key, validate_api_key,
};
pub use error::{PitchMatchError, Result};
pub use types::{InvestorRecord, MatchResult, Source};
