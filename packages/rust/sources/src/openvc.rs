//! Static-page scraper for OpenVC investor profiles.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use pitchmatch_shared::{InvestorRecord, PitchMatchError, Result, Source};

/// Fetch one OpenVC profile page and extract an investor record.
///
/// A non-2xx response or transport failure fails with a fetch error carrying
/// the URL. Missing page elements are not errors — they yield empty fields.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(client: &Client, url: &Url) -> Result<InvestorRecord> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| PitchMatchError::fetch(url.as_str(), e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PitchMatchError::fetch(url.as_str(), format!("HTTP {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| PitchMatchError::fetch(url.as_str(), format!("body read failed: {e}")))?;

    let record = extract_profile(&body);
    debug!(name = %record.name, has_contact = record.contact.is_some(), "profile scraped");
    Ok(record)
}

/// Extract an investor record from OpenVC profile HTML.
///
/// `name` = first H1, `bio` = first paragraph inside the first section,
/// `contact` = first mailto anchor with the scheme prefix stripped.
pub(crate) fn extract_profile(html: &str) -> InvestorRecord {
    let doc = Html::parse_document(html);

    let h1_sel = Selector::parse("h1").unwrap();
    let name = doc
        .select(&h1_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let bio_sel = Selector::parse("section p").unwrap();
    let bio = doc
        .select(&bio_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let mailto_sel = Selector::parse(r#"a[href^="mailto:"]"#).unwrap();
    let contact = doc
        .select(&mailto_sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| href.strip_prefix("mailto:"))
        .map(str::to_string);

    InvestorRecord {
        name,
        bio,
        contact,
        ..InvestorRecord::new(Source::OpenVc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn load_fixture(name: &str) -> String {
        let path = format!("../../../fixtures/html/{name}");
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }

    #[test]
    fn extracts_full_profile() {
        let record = extract_profile(&load_fixture("openvc_profile.html"));
        assert_eq!(record.name, "Sarah Guo");
        assert_eq!(
            record.bio,
            "Founder of Conviction, previously general partner at Greylock."
        );
        assert_eq!(record.contact.as_deref(), Some("sarah@conviction.com"));
        assert_eq!(record.source, Source::OpenVc);
    }

    #[test]
    fn missing_mailto_yields_no_contact() {
        let record = extract_profile(&load_fixture("openvc_no_contact.html"));
        assert_eq!(record.name, "Quiet Fund");
        assert!(record.contact.is_none());
    }

    #[test]
    fn empty_page_yields_empty_fields_not_errors() {
        let record = extract_profile("<html><body></body></html>");
        assert!(record.name.is_empty());
        assert!(record.bio.is_empty());
        assert!(record.contact.is_none());
        assert_eq!(record.source, Source::OpenVc);
    }

    #[tokio::test]
    async fn fetch_scrapes_served_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/investor/sarah-guo"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(load_fixture("openvc_profile.html")),
            )
            .mount(&server)
            .await;

        let client = crate::http_client().unwrap();
        let url = Url::parse(&format!("{}/investor/sarah-guo", server.uri())).unwrap();
        let record = fetch(&client, &url).await.unwrap();
        assert_eq!(record.name, "Sarah Guo");
    }

    #[tokio::test]
    async fn fetch_fails_on_http_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = crate::http_client().unwrap();
        let url = Url::parse(&format!("{}/investor/gone", server.uri())).unwrap();
        let err = fetch(&client, &url).await.unwrap_err();
        assert!(matches!(err, PitchMatchError::Fetch { .. }));
        assert!(err.to_string().contains("404"));
    }
}
