//! Core domain types for investor matching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Origin of an investor record.
///
/// Serialized with the wire strings downstream consumers already expect
/// (`"OpenVC"`, `"Signal NFX"`, `"CSV"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "OpenVC")]
    OpenVc,
    #[serde(rename = "Signal NFX")]
    SignalNfx,
    #[serde(rename = "CSV")]
    Csv,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::OpenVc => "OpenVC",
            Self::SignalNfx => "Signal NFX",
            Self::Csv => "CSV",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// InvestorRecord
// ---------------------------------------------------------------------------

/// Normalized representation of a VC/investor, whatever its origin.
///
/// Built exclusively by the source adapters; downstream code never handles
/// raw scrape output or CSV rows. Spreadsheet columns beyond the named
/// fields are preserved in `extra` (a `BTreeMap` so serialization order is
/// deterministic) and flattened into the output object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorRecord {
    /// Investor name; empty when the source page had no heading.
    #[serde(default)]
    pub name: String,
    /// Short biography; empty when the source had none.
    #[serde(default)]
    pub bio: String,
    /// Email address with the `mailto:` prefix stripped; omitted when the
    /// source exposed no mail link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Free-text focus/sector description (spreadsheet rows only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    /// Remaining spreadsheet columns, keyed by header.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, String>,
    /// Origin discriminant.
    pub source: Source,
}

impl InvestorRecord {
    /// Create an empty record tagged with the given source.
    pub fn new(source: Source) -> Self {
        Self {
            name: String::new(),
            bio: String::new(),
            contact: None,
            focus: None,
            extra: BTreeMap::new(),
            source,
        }
    }

    /// Bio text for prompt building: the `bio` field, falling back to a
    /// spreadsheet `description` column, then to a placeholder.
    pub fn bio_or_description(&self) -> &str {
        if !self.bio.is_empty() {
            return &self.bio;
        }
        match self.extra.get("description") {
            Some(d) if !d.is_empty() => d,
            _ => "No bio available.",
        }
    }

    /// Focus text for prompt building, with the placeholder for unknown.
    pub fn focus_or_unknown(&self) -> &str {
        match self.focus.as_deref() {
            Some(f) if !f.is_empty() => f,
            _ => "Unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// MatchResult
// ---------------------------------------------------------------------------

/// An investor record enriched with the evaluator's verdict.
///
/// `match_analysis` is the reasoning API's response envelope stored verbatim;
/// it is never parsed into a structured boolean here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub investor: InvestorRecord,
    #[serde(rename = "matchAnalysis")]
    pub match_analysis: serde_json::Value,
}
