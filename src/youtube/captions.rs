//! Caption scraping from public watch pages.
//!
//! No API key is involved: the watch page embeds the list of caption tracks,
//! and each track's `baseUrl` serves timed text as XML.

use super::identifier::VideoId;
use super::models::CaptionFragment;
use crate::error::{Result, YtError};
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};

const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

static TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text([^>]*)>(.*?)</text>"#).expect("Invalid regex")
});

static START_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"start="([0-9.]+)""#).expect("Invalid regex"));

static DUR_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"dur="([0-9.]+)""#).expect("Invalid regex"));

/// Raw markup nested inside a `<text>` element (e.g. `<font color="...">`).
static INNER_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid regex"));

/// Source of caption fragments for a video.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch the caption fragments of `video_id` in `language`.
    async fn fetch_captions(&self, video_id: &VideoId, language: &str)
        -> Result<Vec<CaptionFragment>>;
}

/// A caption track advertised on a watch page.
#[derive(Debug, Clone, PartialEq)]
struct CaptionTrack {
    language_code: String,
    base_url: String,
    is_generated: bool,
}

/// Scrapes captions from the public watch page.
pub struct TimedTextScraper {
    client: reqwest::Client,
    watch_base_url: String,
}

impl TimedTextScraper {
    /// Create a scraper for watch pages under `watch_base_url`.
    pub fn new(watch_base_url: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.9"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .inspect_err(|e| warn!("Failed to build caption HTTP client: {}", e))?;

        Ok(Self::with_client(client, watch_base_url))
    }

    pub fn with_client(client: reqwest::Client, watch_base_url: &str) -> Self {
        Self {
            client,
            watch_base_url: watch_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_text(&self, url: &str, what: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| YtError::Transcript(format!("Failed to fetch {}: {}", what, e)))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(YtError::Transcript(
                "YouTube is rate limiting caption requests (HTTP 429)".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(YtError::Transcript(format!(
                "Failed to fetch {}: HTTP {}",
                what, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| YtError::Transcript(format!("Failed to read {}: {}", what, e)))
    }
}

#[async_trait]
impl CaptionSource for TimedTextScraper {
    #[instrument(skip(self, video_id), fields(video_id = %video_id))]
    async fn fetch_captions(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<CaptionFragment>> {
        let watch_url = format!("{}/watch?v={}", self.watch_base_url, video_id);
        let html = self.get_text(&watch_url, "watch page").await?;

        if html.contains("g-recaptcha") {
            return Err(YtError::Transcript(
                "YouTube blocked the request with a captcha".to_string(),
            ));
        }

        let tracks = extract_caption_tracks(&html).ok_or_else(|| {
            YtError::Transcript(format!("Captions are disabled for video {}", video_id))
        })?;
        debug!("Found {} caption tracks", tracks.len());

        let track = select_track(&tracks, language).ok_or_else(|| {
            let available: Vec<&str> = tracks.iter().map(|t| t.language_code.as_str()).collect();
            YtError::Transcript(format!(
                "No captions in language '{}' for video {} (available: {})",
                language,
                video_id,
                available.join(", ")
            ))
        })?;
        debug!(
            "Using {} track ({})",
            track.language_code,
            if track.is_generated { "auto-generated" } else { "manual" }
        );

        let xml = self.get_text(&track.base_url, "caption track").await?;
        Ok(parse_timed_text(&xml))
    }
}

/// Pull the `captionTracks` array out of a watch page.
///
/// Returns `None` when the page advertises no tracks at all.
fn extract_caption_tracks(html: &str) -> Option<Vec<CaptionTrack>> {
    let start = html.find(CAPTION_TRACKS_MARKER)? + CAPTION_TRACKS_MARKER.len();

    // Read exactly one JSON value and ignore the rest of the page.
    let raw = serde_json::Deserializer::from_str(&html[start..])
        .into_iter::<Value>()
        .next()?
        .ok()?;

    let tracks: Vec<CaptionTrack> = raw
        .as_array()?
        .iter()
        .filter_map(|track| {
            let language_code = track.get("languageCode")?.as_str()?.to_string();
            let base_url = track.get("baseUrl")?.as_str()?.replace("&fmt=srv3", "");
            let is_generated = track.get("kind").and_then(Value::as_str) == Some("asr");
            Some(CaptionTrack {
                language_code,
                base_url,
                is_generated,
            })
        })
        .collect();

    if tracks.is_empty() {
        None
    } else {
        Some(tracks)
    }
}

/// Pick the track for `language`: manual over generated, exact code over a
/// regional variant (`en` accepts `en-GB`).
fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    let exact = |t: &&CaptionTrack| t.language_code.eq_ignore_ascii_case(language);
    let variant = |t: &&CaptionTrack| is_regional_variant(&t.language_code, language);

    tracks
        .iter()
        .filter(|t| !t.is_generated)
        .find(exact)
        .or_else(|| tracks.iter().find(exact))
        .or_else(|| tracks.iter().filter(|t| !t.is_generated).find(variant))
        .or_else(|| tracks.iter().find(variant))
}

/// Whether `code` is a regional form of `language` (`en-GB` for `en`), ignoring case.
fn is_regional_variant(code: &str, language: &str) -> bool {
    match (code.get(..language.len()), code.get(language.len()..)) {
        (Some(base), Some(region)) => {
            base.eq_ignore_ascii_case(language) && region.len() > 1 && region.starts_with('-')
        }
        _ => false,
    }
}

/// Parse `<text start=".." dur="..">..</text>` elements.
///
/// Element content is XML-escaped exactly once. Raw nested markup is
/// stripped first so that decoded `<` and `>` survive as text.
fn parse_timed_text(xml: &str) -> Vec<CaptionFragment> {
    TEXT_ELEMENT
        .captures_iter(xml)
        .map(|caps| {
            let attrs = &caps[1];
            let start = START_ATTR
                .captures(attrs)
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(0.0);
            let duration = DUR_ATTR
                .captures(attrs)
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(0.0);

            let raw = INNER_TAG.replace_all(&caps[2], "");
            let text = html_escape::decode_html_entities(&raw).replace('\n', " ");

            CaptionFragment {
                text: text.trim().to_string(),
                start,
                duration,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMED_TEXT: &str = r##"<?xml version="1.0" encoding="utf-8" ?><transcript>
<text start="0.5" dur="2.1">Never gonna give you up</text>
<text start="2.6" dur="1.9">never gonna &#39;let&#39; you down</text>
<text start="4.5" dur="1"><font color="#E5E5E5">music</font></text>
</transcript>"##;

    fn watch_page(tracks: &str) -> String {
        format!(
            r#"<html><script>var ytInitialPlayerResponse = {{"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":{},"audioTracks":[]}}}}}};</script></html>"#,
            tracks
        )
    }

    fn track(code: &str, generated: bool) -> CaptionTrack {
        CaptionTrack {
            language_code: code.to_string(),
            base_url: format!("https://example.com/{}", code),
            is_generated: generated,
        }
    }

    #[test]
    fn test_extract_caption_tracks() {
        let html = watch_page(
            r#"[{"baseUrl":"https://www.youtube.com/api/timedtext?v=x&lang=en&fmt=srv3","name":{"runs":[{"text":"English"}]},"languageCode":"en"},{"baseUrl":"https://www.youtube.com/api/timedtext?v=x&lang=de","languageCode":"de","kind":"asr"}]"#,
        );

        let tracks = extract_caption_tracks(&html).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "en");
        assert_eq!(tracks[0].base_url, "https://www.youtube.com/api/timedtext?v=x&lang=en");
        assert!(!tracks[0].is_generated);
        assert!(tracks[1].is_generated);
    }

    #[test]
    fn test_extract_caption_tracks_absent() {
        assert!(extract_caption_tracks("<html>no captions here</html>").is_none());
        assert!(extract_caption_tracks(&watch_page("[]")).is_none());
    }

    #[test]
    fn test_select_track_preferences() {
        let tracks = vec![track("en", true), track("en", false), track("pt-BR", false)];
        assert!(!select_track(&tracks, "en").unwrap().is_generated);
        assert_eq!(select_track(&tracks, "pt").unwrap().language_code, "pt-BR");
        assert!(select_track(&tracks, "fr").is_none());

        let generated_only = vec![track("en", true)];
        assert!(select_track(&generated_only, "en").unwrap().is_generated);
    }

    #[test]
    fn test_parse_timed_text() {
        let fragments = parse_timed_text(TIMED_TEXT);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].text, "Never gonna give you up");
        assert_eq!(fragments[0].start, 0.5);
        assert_eq!(fragments[0].duration, 2.1);
        assert_eq!(fragments[1].text, "never gonna 'let' you down");
        assert_eq!(fragments[2].text, "music");
    }

    #[test]
    fn test_parse_timed_text_decodes_once() {
        let fragments = parse_timed_text(
            r#"<transcript><text start="0" dur="1">if a &lt; b and c &gt; d then</text><text start="1" dur="1">AT&amp;amp;T</text><text start="2" dur="1">&quot;q&quot; &#x27;hi&#39;</text></transcript>"#,
        );
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["if a < b and c > d then", "AT&amp;T", "\"q\" 'hi'"]);
    }

    #[test]
    fn test_regional_variant_ignores_case() {
        assert!(is_regional_variant("en-GB", "EN"));
        assert!(is_regional_variant("pt-br", "pt"));
        assert!(!is_regional_variant("en", "en"));
        assert!(!is_regional_variant("eng", "en"));
        assert!(!is_regional_variant("en-", "en"));

        let tracks = vec![track("en-GB", false)];
        assert_eq!(select_track(&tracks, "EN").unwrap().language_code, "en-GB");
    }

    #[tokio::test]
    async fn test_fetch_captions_end_to_end() {
        let server = MockServer::start().await;
        let track_url = format!("{}/api/timedtext?v=dQw4w9WgXcQ&lang=en", server.uri());
        let tracks = format!(r#"[{{"baseUrl":"{}","languageCode":"en"}}]"#, track_url);

        Mock::given(method("GET"))
            .and(path("/watch"))
            .and(query_param("v", "dQw4w9WgXcQ"))
            .respond_with(ResponseTemplate::new(200).set_body_string(watch_page(&tracks)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/timedtext"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TIMED_TEXT))
            .mount(&server)
            .await;

        let scraper = TimedTextScraper::new(&server.uri()).unwrap();
        let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let fragments = scraper.fetch_captions(&video_id, "en").await.unwrap();
        assert_eq!(fragments.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_captions_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/watch"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let scraper = TimedTextScraper::new(&server.uri()).unwrap();
        let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let err = scraper.fetch_captions(&video_id, "en").await.unwrap_err();
        assert!(matches!(err, YtError::Transcript(ref m) if m.contains("disabled")));
    }

    #[tokio::test]
    async fn test_fetch_captions_wrong_language() {
        let server = MockServer::start().await;
        let tracks = r#"[{"baseUrl":"https://example.com/de","languageCode":"de"}]"#;
        Mock::given(method("GET"))
            .and(path("/watch"))
            .respond_with(ResponseTemplate::new(200).set_body_string(watch_page(tracks)))
            .mount(&server)
            .await;

        let scraper = TimedTextScraper::new(&server.uri()).unwrap();
        let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let err = scraper.fetch_captions(&video_id, "en").await.unwrap_err();
        assert!(matches!(err, YtError::Transcript(ref m) if m.contains("available: de")));
    }
}
