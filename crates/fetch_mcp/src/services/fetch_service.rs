use std::sync::Arc;

use reqwest::{StatusCode, header};
use url::Url;

use crate::config::FetchConfig;
use crate::errors::FetchServerError;
use crate::models::Identity;
use crate::utils::{ContentKind, RobotsTxt, build_client, get_robots_txt_url, transform};

const SIMPLIFIED_PREFIX: &str =
    "Content was simplified from HTML to markdown. Use raw=true to get the exact page source.\n";

/// The fetch pipeline: identity-aware retrieval, content classification and
/// simplification, and the robots.txt gate for autonomous fetching.
#[derive(Clone)]
pub struct FetchService {
    config: Arc<FetchConfig>,
}

impl FetchService {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Fetch `url` and return `(content, prefix)`.
    ///
    /// The prefix is an advisory notice that the content was simplified; it
    /// is empty whenever the raw body is returned. All transport-level
    /// failures are folded into [`FetchServerError`] here so the tool layer
    /// only ever formats them.
    pub async fn fetch_url(
        &self,
        url: &str,
        identity: Identity,
        force_raw: bool,
    ) -> Result<(String, String), FetchServerError> {
        let client = build_client(self.config.proxy_url())?;

        let response = client
            .get(url)
            .header(header::USER_AGENT, self.config.user_agent(identity))
            .send()
            .await
            .map_err(|e| FetchServerError::FetchError {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchServerError::HttpError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response
            .text()
            .await
            .map_err(|e| FetchServerError::FetchError {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let kind = ContentKind::classify(content_type.as_deref(), &body);
        let (content, used_raw) = transform(body, kind, force_raw).await;
        let prefix = if used_raw {
            String::new()
        } else {
            SIMPLIFIED_PREFIX.to_string()
        };

        Ok((content, prefix))
    }

    /// Check whether the site's robots.txt permits an autonomous fetch of
    /// `url`.
    ///
    /// A 401/403 on robots.txt itself means the site forbids crawling; any
    /// other 4xx means no policy is published and the fetch proceeds. An
    /// unreachable robots.txt also fails open, so a site with a broken
    /// policy endpoint stays fetchable; real connectivity problems surface
    /// on the main fetch anyway.
    pub async fn check_may_autonomously_fetch_url(
        &self,
        url: &str,
    ) -> Result<(), FetchServerError> {
        let robots_url = get_robots_txt_url(url)?;
        let user_agent = self.config.user_agent(Identity::Autonomous);
        let client = build_client(self.config.proxy_url())?;

        let response = match client
            .get(&robots_url)
            .header(header::USER_AGENT, user_agent)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("robots.txt unreachable at {robots_url}, allowing fetch: {e}");
                return Ok(());
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchServerError::RobotsForbidden {
                url: url.to_string(),
                message: format!(
                    "When fetching robots.txt ({robots_url}), received status {} so assuming that autonomous fetching is not allowed. The user can still ask for this page manually with the fetch prompt.",
                    status.as_u16()
                ),
            });
        }
        if status.is_client_error() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let robots = RobotsTxt::parse(&body);

        let parsed = Url::parse(url).map_err(|_| FetchServerError::InvalidUrl {
            url: url.to_string(),
        })?;
        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }

        if !robots.allows(user_agent, &path) {
            return Err(FetchServerError::RobotsDisallowed {
                url: url.to_string(),
                message: format!(
                    "The site's robots.txt ({robots_url}) specifies that autonomous fetching of {url} is not allowed for user agent {user_agent}. The user can still ask for this page manually with the fetch prompt."
                ),
            });
        }

        Ok(())
    }
}

impl Default for FetchService {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}
