use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, LINK};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{BadgeError, Result};
use crate::fetch::JsonFetcher;

// Classic projects are served under the inertia preview media type.
const PROJECTS_MEDIA_TYPE: &str = "application/vnd.github.inertia-preview+json";
const USER_AGENT: &str = concat!("gh-project-badge/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    per_page: u32,
    max_pages: u32,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        let base_url = config.api_url();
        Url::parse(&base_url).map_err(|_| BadgeError::InvalidUrl(base_url.clone()))?;

        Ok(Self {
            http,
            base_url,
            token: config.token(),
            per_page: config.per_page(),
            max_pages: config.max_pages(),
        })
    }

    fn first_page_url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw).map_err(|_| BadgeError::InvalidUrl(raw.clone()))?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }

    /// The token is only ever sent to the configured API host.
    fn is_api_origin(&self, url: &Url) -> bool {
        Url::parse(&self.base_url).is_ok_and(|base| base.origin() == url.origin())
    }

    async fn get_page(&self, url: Url, not_found: &str) -> Result<(Value, Option<Url>)> {
        debug!(%url, "GET");

        let mut request = self.http.get(url.clone()).header(ACCEPT, PROJECTS_MEDIA_TYPE);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            warn!(%url, status = status.as_u16(), "upstream request failed");
            return Err(status_error(status, message, not_found));
        }

        let next = next_page(response.headers());
        let body = response.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| BadgeError::InvalidResponse {
            shape: "json",
            reason: e.to_string(),
        })?;
        Ok((value, next))
    }
}

#[async_trait]
impl JsonFetcher for GitHubClient {
    async fn fetch_json(&self, path: &str, not_found: &str) -> Result<Value> {
        let (first, mut next) = self.get_page(self.first_page_url(path)?, not_found).await?;

        // Anything but an array goes to the shape check untouched.
        let mut items = match first {
            Value::Array(items) => items,
            other => return Ok(other),
        };

        let mut pages = 1;
        while let Some(url) = next.take() {
            if pages >= self.max_pages {
                warn!(path, pages, "pagination exceeds max_pages");
                return Err(BadgeError::TooManyPages {
                    path: path.to_string(),
                    max_pages: self.max_pages,
                });
            }
            if !self.is_api_origin(&url) {
                warn!(path, %url, "pagination link leaves the API origin");
                return Err(BadgeError::InvalidResponse {
                    shape: "pagination",
                    reason: format!("next page {url} is outside {}", self.base_url),
                });
            }
            let (page, following) = self.get_page(url, not_found).await?;
            match page {
                Value::Array(more) => items.extend(more),
                other => return Ok(other),
            }
            next = following;
            pages += 1;
        }

        Ok(Value::Array(items))
    }
}

/// Map a non-success status to an error, using `not_found` for the
/// statuses GitHub returns for unknown or malformed ids.
fn status_error(status: StatusCode, message: String, not_found: &str) -> BadgeError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => BadgeError::NotFound {
            hint: not_found.to_string(),
        },
        _ => BadgeError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// URL of the `rel="next"` entry in a `Link` header, if any.
fn next_page(headers: &HeaderMap) -> Option<Url> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| param.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}
