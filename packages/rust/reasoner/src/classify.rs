//! Pitch classification: one chat call, parsed into ordered sector tags.

use tracing::{debug, instrument};

use pitchmatch_shared::Result;

use crate::client::ReasonerClient;

/// Build the sector-identification prompt for a pitch.
pub fn classification_prompt(pitch: &str) -> String {
    format!(
        "Given the following startup pitch, identify the primary domains or sectors \
         it belongs to (e.g., AI, Climate, SaaS, HealthTech):\n\n\"{pitch}\"\n\n\
         Return a comma-separated list."
    )
}

/// Classify a pitch into an ordered sequence of focus tags.
///
/// Tags are lower-cased and trimmed; duplicates are kept and order follows
/// the response. An envelope without a usable `text` field yields an empty
/// sequence — that is a valid "unknown" classification, not an error. Only
/// transport failures and malformed envelopes surface as errors.
#[instrument(skip_all, fields(pitch_len = pitch.len()))]
pub async fn classify(client: &ReasonerClient, pitch: &str) -> Result<Vec<String>> {
    let envelope = client.chat(&classification_prompt(pitch)).await?;
    let tags = parse_focus_tags(&envelope);
    debug!(tags = tags.len(), "pitch classified");
    Ok(tags)
}

/// Extract focus tags from a response envelope.
pub(crate) fn parse_focus_tags(envelope: &serde_json::Value) -> Vec<String> {
    match envelope.get("text").and_then(serde_json::Value::as_str) {
        Some(text) => text
            .to_lowercase()
            .split(',')
            .map(|tag| tag.trim().to_string())
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn prompt_embeds_pitch_and_asks_for_list() {
        let prompt = classification_prompt("AI-powered climate analytics");
        assert!(prompt.contains("\"AI-powered climate analytics\""));
        assert!(prompt.contains("comma-separated list"));
    }

    #[test]
    fn parses_well_formed_list() {
        let envelope = serde_json::json!({ "text": "AI, Climate , SaaS" });
        assert_eq!(parse_focus_tags(&envelope), vec!["ai", "climate", "saas"]);
    }

    #[test]
    fn keeps_duplicates_and_response_order() {
        let envelope = serde_json::json!({ "text": "ai, fintech, ai" });
        assert_eq!(parse_focus_tags(&envelope), vec!["ai", "fintech", "ai"]);
    }

    #[test]
    fn missing_text_field_is_empty_not_error() {
        let envelope = serde_json::json!({ "usage": { "tokens": 12 } });
        assert!(parse_focus_tags(&envelope).is_empty());
    }

    #[test]
    fn non_string_text_field_is_empty() {
        let envelope = serde_json::json!({ "text": 42 });
        assert!(parse_focus_tags(&envelope).is_empty());
    }

    #[tokio::test]
    async fn classify_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat"))
            .and(body_string_contains("identify the primary domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "AI, Climate"
            })))
            .mount(&server)
            .await;

        let client = ReasonerClient::new(&pitchmatch_shared::ReasonerSettings {
            base_url: server.uri(),
            api_key: "k".into(),
            timeout_secs: 5,
        })
        .unwrap();

        let tags = classify(&client, "AI-powered climate analytics").await.unwrap();
        assert_eq!(tags, vec!["ai", "climate"]);
    }
}
