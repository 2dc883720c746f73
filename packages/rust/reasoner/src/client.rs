//! Authenticated HTTP client for the remote reasoning API.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use pitchmatch_shared::{PitchMatchError, ReasonerSettings, Result};

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("PitchMatch/", env!("CARGO_PKG_VERSION"));

/// Chat endpoint path, joined onto the configured base URL.
const CHAT_PATH: &str = "/api/v1/chat";

/// Client for the reasoning API's chat endpoint.
///
/// Constructed once per run from [`ReasonerSettings`] and shared by the
/// classifier and the evaluator. The response envelope is vendor-defined;
/// callers receive it as opaque JSON.
#[derive(Debug)]
pub struct ReasonerClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl ReasonerClient {
    /// Create a new client from resolved settings.
    pub fn new(settings: &ReasonerSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            PitchMatchError::config(format!("invalid reasoner base URL '{}': {e}", settings.base_url))
        })?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| PitchMatchError::Api(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
        })
    }

    /// Send one prompt and return the raw response envelope.
    ///
    /// Fails with an `Api` error on transport failure, a non-success status,
    /// or a body that is not JSON. Semantically empty answers are the
    /// caller's concern.
    pub async fn chat(&self, prompt: &str) -> Result<serde_json::Value> {
        let endpoint = self
            .base_url
            .join(CHAT_PATH)
            .map_err(|e| PitchMatchError::Api(format!("invalid chat endpoint: {e}")))?;

        debug!(prompt_len = prompt.len(), "sending chat request");

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| PitchMatchError::Api(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PitchMatchError::Api(format!(
                "HTTP {status} from reasoning API"
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| PitchMatchError::Api(format!("malformed response envelope: {e}")))
    }
}
