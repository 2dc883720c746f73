//! Result artifact: a single pretty-printed JSON array, fully overwritten
//! each run.

use std::path::Path;

use tracing::info;

use pitchmatch_shared::{MatchResult, PitchMatchError, Result};

/// Serialize the accumulated results and write them to `path`.
///
/// Replaces any prior content. The artifact carries no timestamps, so two
/// runs over identical inputs produce byte-identical files.
pub fn write_results(path: &Path, results: &[MatchResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results)
        .map_err(|e| PitchMatchError::io(path, std::io::Error::other(e)))?;

    std::fs::write(path, json).map_err(|e| PitchMatchError::io(path, e))?;

    info!(path = %path.display(), results = results.len(), "match results written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchmatch_shared::{InvestorRecord, Source};

    fn sample_results() -> Vec<MatchResult> {
        vec![MatchResult {
            investor: InvestorRecord {
                name: "Fund A".into(),
                focus: Some("ai, fintech".into()),
                ..InvestorRecord::new(Source::Csv)
            },
            match_analysis: serde_json::json!({ "text": "YES" }),
        }]
    }

    #[test]
    fn writes_pretty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        write_results(&path, &sample_results()).expect("write");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('['));
        assert!(content.contains("\n")); // pretty-printed
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["name"], "Fund A");
        assert_eq!(parsed[0]["matchAnalysis"]["text"], "YES");
    }

    #[test]
    fn empty_results_write_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        write_results(&path, &[]).expect("write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn overwrites_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "stale content from a previous run").unwrap();

        write_results(&path, &[]).expect("write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn identical_inputs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");

        write_results(&first, &sample_results()).unwrap();
        write_results(&second, &sample_results()).unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let err = write_results(Path::new("/nonexistent/dir/results.json"), &[]).unwrap_err();
        assert!(matches!(err, PitchMatchError::Io { .. }));
    }
}
