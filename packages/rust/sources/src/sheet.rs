//! Eager CSV reader for local investor lists.

use std::path::Path;

use tracing::{debug, instrument};

use pitchmatch_shared::{InvestorRecord, PitchMatchError, Result, Source};

/// Load the whole investor spreadsheet into memory.
///
/// The file must have a header row including a `focus` column — the
/// downstream filter depends on it, so its absence is a schema error for
/// the whole file. An unreadable file or a broken stream is a single
/// terminal file error, never a per-row one.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_list(path: &Path) -> Result<Vec<InvestorRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| PitchMatchError::File(format!("{}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| PitchMatchError::File(format!("{}: {e}", path.display())))?
        .clone();

    if !headers.iter().any(|h| h == "focus") {
        return Err(PitchMatchError::schema(format!(
            "missing required column `focus` in {}",
            path.display()
        )));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| PitchMatchError::File(format!("{}: {e}", path.display())))?;
        records.push(record_from_row(&headers, &row));
    }

    debug!(rows = records.len(), "investor spreadsheet loaded");
    Ok(records)
}

/// Map one CSV row onto an investor record.
///
/// Known columns fill the named fields; everything else is preserved in
/// `extra` so no spreadsheet data is lost on the way to the output file.
fn record_from_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> InvestorRecord {
    let mut record = InvestorRecord::new(Source::Csv);

    for (header, value) in headers.iter().zip(row.iter()) {
        match header {
            "name" => record.name = value.to_string(),
            "bio" => record.bio = value.to_string(),
            "contact" => {
                record.contact = (!value.is_empty()).then(|| value.to_string());
            }
            "focus" => record.focus = Some(value.to_string()),
            _ => {
                record.extra.insert(header.to_string(), value.to_string());
            }
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn loads_rows_eagerly() {
        let file = write_csv(
            "name,focus,description,stage\n\
             Fund A,\"ai, fintech\",Backs ML infrastructure,seed\n\
             Fund B,biotech,Life-science specialists,series-a\n",
        );

        let records = load_list(file.path()).expect("load");
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name, "Fund A");
        assert_eq!(records[0].focus.as_deref(), Some("ai, fintech"));
        assert_eq!(
            records[0].extra.get("description").map(String::as_str),
            Some("Backs ML infrastructure")
        );
        assert_eq!(records[0].extra.get("stage").map(String::as_str), Some("seed"));
        assert_eq!(records[0].source, Source::Csv);

        assert_eq!(records[1].name, "Fund B");
        assert_eq!(records[1].focus.as_deref(), Some("biotech"));
    }

    #[test]
    fn fixture_list_parses() {
        let records =
            load_list(Path::new("../../../fixtures/csv/investors.csv")).expect("load fixture");
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.focus.is_some()));
    }

    #[test]
    fn missing_focus_column_is_schema_error() {
        let file = write_csv("name,sector\nFund A,ai\n");
        let err = load_list(file.path()).unwrap_err();
        assert!(matches!(err, PitchMatchError::Schema { .. }));
        assert!(err.to_string().contains("focus"));
    }

    #[test]
    fn missing_file_is_file_error() {
        let err = load_list(Path::new("/nonexistent/investors.csv")).unwrap_err();
        assert!(matches!(err, PitchMatchError::File(_)));
    }

    #[test]
    fn empty_contact_cell_is_absent() {
        let file = write_csv("name,focus,contact\nFund A,ai,\nFund B,ai,b@fund.com\n");
        let records = load_list(file.path()).expect("load");
        assert!(records[0].contact.is_none());
        assert_eq!(records[1].contact.as_deref(), Some("b@fund.com"));
    }
}
