use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{config, types::Session};

use super::{FetchError, PaginationPolicy};

/// Handle to the Spotify Web API.
///
/// Holds the HTTP client, the API base URL and the request defaults every
/// data-access function needs. Cloning is cheap; the underlying connection
/// pool is shared.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    country: String,
    pagination: PaginationPolicy,
}

impl SpotifyClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// A trailing slash on `base_url` is removed so paths can always start
    /// with `/`. The market defaults to [`config::DEFAULT_COUNTRY`] and the
    /// pagination policy to [`PaginationPolicy::default`].
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `https://api.spotify.com/v1`
    ///
    /// # Example
    ///
    /// ```
    /// let client = SpotifyClient::new("http://127.0.0.1:8080/v1/")
    ///     .with_country("SE");
    /// assert_eq!(client.base_url(), "http://127.0.0.1:8080/v1");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            country: config::DEFAULT_COUNTRY.to_string(),
            pagination: PaginationPolicy::default(),
        }
    }

    /// Builds a client from the environment (see [`crate::config`]).
    pub fn from_config() -> Self {
        Self::new(config::spotify_apiurl())
            .with_country(config::spotify_country())
            .with_pagination(config::pagination_policy())
    }

    /// Sets the market used by the browse endpoints (`country=` parameter).
    ///
    /// # Arguments
    ///
    /// * `country` - ISO 3166-1 alpha-2 code such as `IN` or `SE`
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets how multi-page collections are followed.
    pub fn with_pagination(mut self, pagination: PaginationPolicy) -> Self {
        self.pagination = pagination;
        self
    }

    /// API root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn pagination(&self) -> &PaginationPolicy {
        &self.pagination
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url, path = path)
    }

    /// Performs one authenticated GET and parses the body as JSON.
    ///
    /// This is the only place a request leaves the crate. The session's access
    /// token is sent as a bearer token.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL, usually built with the client's base URL or
    ///   taken from a page's `next` cursor
    /// * `session` - Signed-in session, if any
    ///
    /// # Returns
    ///
    /// - `Ok(Value)` - The parsed response body
    /// - `Err(FetchError)` - See below
    ///
    /// # Error Handling
    ///
    /// Checks run in this order and the first failure wins:
    /// - Absent or expired session: [`FetchError::Unauthenticated`],
    ///   nothing is sent
    /// - Connection or body read failure: [`FetchError::Transport`]
    /// - Non-2xx status: [`FetchError::Status`] with code and reason
    /// - Empty body: [`FetchError::EmptyBody`]
    /// - Body that is not JSON: [`FetchError::Decode`]
    ///
    /// Every failure is logged at `warn` level. No retries are attempted.
    ///
    /// # Example
    ///
    /// ```
    /// let url = format!("{}/me", client.base_url());
    /// let me = client.get_json(&url, sessions.current()).await?;
    /// println!("{}", me["display_name"]);
    /// ```
    pub async fn get_json(&self, url: &str, session: Option<&Session>) -> Result<Value, FetchError> {
        let Some(session) = session.filter(|s| s.is_valid()) else {
            debug!(url, "skipping request without a valid session");
            return Err(FetchError::Unauthenticated);
        };

        let response = self
            .http
            .get(url)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "error fetching data");
                FetchError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            warn!(url, status = status.as_u16(), %reason, "error fetching data");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let text = response.text().await.map_err(|e| {
            warn!(url, error = %e, "error reading response body");
            FetchError::Transport(e)
        })?;
        if text.is_empty() {
            warn!(url, "received empty response from API");
            return Err(FetchError::EmptyBody);
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(url, error = %e, "error parsing response");
            FetchError::Decode(e)
        })
    }

    /// Like [`get_json`](Self::get_json) but decodes into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        session: Option<&Session>,
    ) -> Result<T, FetchError> {
        let value = self.get_json(url, session).await?;
        serde_json::from_value(value).map_err(|e| {
            warn!(url, error = %e, "response does not match the expected shape");
            FetchError::Decode(e)
        })
    }

    /// Every failure collapses to `None`. Meant for callers that only care
    /// whether data is present.
    pub async fn custom_get(&self, url: &str, session: Option<&Session>) -> Option<Value> {
        self.get_json(url, session).await.ok()
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new(config::DEFAULT_API_URL)
    }
}
