//! Short link lookup used to link a spreadsheet API by voice
//!
//! Spreadsheet API URLs are far too long to dictate, so the user publishes one
//! behind a short link service and speaks only the keyword. The link is
//! requested without following redirects and the first `Location` is the API URL.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{redirect, Client};
use std::time::Duration;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ShortLinkError {
    #[error("Short link keyword '{0}' is not valid")]
    InvalidKeyword(String),
    #[error("Short link does not redirect anywhere")]
    NotARedirect,
    #[error("Short link has no usable redirect target")]
    NoTarget,
    #[error("Short link request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Turns a spoken short link keyword into the URL it points at
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, keyword: &str) -> Result<String, ShortLinkError>;
}

#[derive(Debug, Clone)]
pub struct ShortLinkResolver {
    client: Client,
    base: String,
}

impl ShortLinkResolver {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ShortLinkError> {
        let client = Client::builder().redirect(redirect::Policy::none()).timeout(timeout).build()?;
        Ok(Self { client, base: base.trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl LinkResolver for ShortLinkResolver {
    async fn resolve(&self, keyword: &str) -> Result<String, ShortLinkError> {
        let keyword = keyword.trim();
        if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ShortLinkError::InvalidKeyword(keyword.to_string()));
        }

        let link = format!("{}/{}", self.base, keyword);
        let link_url =
            Url::parse(&link).map_err(|_| ShortLinkError::InvalidKeyword(keyword.to_string()))?;
        debug!("Resolving short link {}", link_url);

        let response = self.client.get(link_url.clone()).send().await?;
        let status = response.status();

        if status.is_success() {
            return Err(ShortLinkError::NotARedirect);
        }
        if !status.is_redirection() {
            debug!("Short link answered with status {}", status);
            return Err(ShortLinkError::NoTarget);
        }

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .ok_or(ShortLinkError::NoTarget)?;

        // Relative redirects are resolved against the short link itself
        let target = link_url.join(location).map_err(|_| ShortLinkError::NoTarget)?;
        info!("Short link '{}' resolved", keyword);
        Ok(target.to_string())
    }
}
