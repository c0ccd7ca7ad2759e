//! Thin client for the YouTube Data API v3.

use crate::error::{Result, YtError};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

/// Query parameter carrying the API key. Callers cannot override it.
const KEY_PARAM: &str = "key";

/// YouTube Data API client holding the static API key.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_http_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client that reuses an existing HTTP client.
    pub fn with_http_client(http: reqwest::Client, base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| YtError::Config(format!("Invalid API base URL {:?}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(YtError::Config(format!(
                "API base URL cannot have paths appended: {}",
                base_url
            )));
        }

        if api_key.trim().is_empty() {
            return Err(YtError::Config("YouTube API key is empty".to_string()));
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.trim().to_string(),
        })
    }

    /// Build the request URL for `endpoint` with the key and `params` attached.
    pub fn endpoint_url(&self, endpoint: &str, params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair(KEY_PARAM, &self.api_key);
            for (name, value) in params.iter().filter(|(name, _)| *name != KEY_PARAM) {
                query.append_pair(name, value);
            }
        }

        url
    }

    /// GET `endpoint` once and return the parsed JSON body.
    ///
    /// A non-success status becomes [`YtError::UpstreamApi`] carrying the status
    /// code and the raw body text.
    #[instrument(skip(self, params), fields(params = params.len()))]
    pub async fn fetch_endpoint(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint, params);
        debug!("GET {}/{}", self.base_url.path(), endpoint);

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("YouTube API returned {} for {}", status, endpoint);
            return Err(YtError::UpstreamApi {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let json: Value = serde_json::from_slice(&bytes)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_url_attaches_key_and_params() {
        let client = ApiClient::new("https://www.googleapis.com/youtube/v3", "secret").unwrap();
        let url = client.endpoint_url(
            "videos",
            &[("part", "snippet,statistics".to_string()), ("id", "dQw4w9WgXcQ".to_string())],
        );

        assert_eq!(url.path(), "/youtube/v3/videos");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "secret".to_string()),
                ("part".to_string(), "snippet,statistics".to_string()),
                ("id".to_string(), "dQw4w9WgXcQ".to_string()),
            ]
        );
    }

    #[test]
    fn test_endpoint_url_ignores_caller_key() {
        let client = ApiClient::new("https://www.googleapis.com/youtube/v3/", "secret").unwrap();
        let url = client.endpoint_url("search", &[("key", "stolen".to_string())]);

        assert_eq!(url.path(), "/youtube/v3/search");
        let keys: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "key")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(keys, vec!["secret".to_string()]);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(matches!(
            ApiClient::new("not a url", "secret"),
            Err(YtError::Config(_))
        ));
        assert!(matches!(
            ApiClient::new("https://www.googleapis.com/youtube/v3", "  "),
            Err(YtError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_endpoint_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("key", "secret"))
            .and(query_param("id", "dQw4w9WgXcQ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), "secret").unwrap();
        let body = client
            .fetch_endpoint("videos", &[("id", "dQw4w9WgXcQ".to_string())])
            .await
            .unwrap();

        assert_eq!(body, json!({"items": []}));
    }

    #[tokio::test]
    async fn test_fetch_endpoint_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(403).set_body_string("quotaExceeded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), "secret").unwrap();
        let err = client.fetch_endpoint("channels", &[]).await.unwrap_err();

        match err {
            YtError::UpstreamApi { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "quotaExceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_endpoint_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), "secret").unwrap();
        let err = client.fetch_endpoint("search", &[]).await.unwrap_err();
        assert!(matches!(err, YtError::Json(_)));
    }
}
