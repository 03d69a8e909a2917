//! HTTP client for the social-graph service.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::domain::SocialGraphError;
use crate::domain::social_graph::SocialGraphClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Social-graph client speaking plain HTTP.
///
/// Identity lookups are `GET {base}/users/{username}`:
/// - 2xx - the user exists
/// - 404 - unknown user
/// - anything else, or a transport error - the service is unavailable
#[derive(Debug, Clone)]
pub struct HttpSocialGraphClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSocialGraphClient {
    /// Creates a client for the service at `host:port`.
    ///
    /// No request is made here; reachability is discovered on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SocialGraphError::Unavailable`] if the endpoint does not form a
    /// valid URL or the HTTP client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, SocialGraphError> {
        let base_url = Url::parse(&format!("http://{}/", endpoint.trim_end_matches('/')))
            .map_err(|e| {
                SocialGraphError::Unavailable(format!("invalid social graph endpoint: {e}"))
            })?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| SocialGraphError::Unavailable(format!("failed to build client: {e}")))?;

        Ok(Self { http, base_url })
    }

    fn user_url(&self, username: &str) -> Result<Url, SocialGraphError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SocialGraphError::Unavailable("endpoint cannot be a base URL".into()))?
            .pop_if_empty()
            .extend(["users", username]);
        Ok(url)
    }
}

#[async_trait]
impl SocialGraphClient for HttpSocialGraphClient {
    async fn validate_user(&self, username: &str) -> Result<(), SocialGraphError> {
        let url = self.user_url(username)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SocialGraphError::Unavailable(e.to_string()))?;

        let status = response.status();
        debug!(username, %status, "Social graph user lookup");

        match status {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(SocialGraphError::UnknownUser(username.to_string())),
            s => Err(SocialGraphError::Unavailable(format!(
                "unexpected status {s} from social graph"
            ))),
        }
    }
}
