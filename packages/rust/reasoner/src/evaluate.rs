//! Match evaluation: one chat call per investor, verdict attached verbatim.

use tracing::instrument;

use pitchmatch_shared::{InvestorRecord, MatchResult, Result};

use crate::client::ReasonerClient;

/// Build the YES/NO evaluation prompt for an investor.
pub fn match_prompt(pitch: &str, investor: &InvestorRecord) -> String {
    format!(
        "Given the startup pitch: \"{pitch}\", evaluate if the following investor \
         is a good match:\n\nName: {}\nBio: {}\nFocus: {}\n\n\
         Respond with a YES/NO and explain.",
        investor.name,
        investor.bio_or_description(),
        investor.focus_or_unknown(),
    )
}

/// Evaluate one investor against the pitch.
///
/// The whole response envelope is attached as `matchAnalysis` without
/// parsing the verdict; downstream consumers interpret the free text.
/// Transport failures propagate — the orchestrator decides whether the
/// record is skipped.
#[instrument(skip_all, fields(investor = %investor.name, source = %investor.source))]
pub async fn evaluate(
    client: &ReasonerClient,
    pitch: &str,
    investor: InvestorRecord,
) -> Result<MatchResult> {
    let analysis = client.chat(&match_prompt(pitch, &investor)).await?;
    Ok(MatchResult {
        investor,
        match_analysis: analysis,
    })
}
