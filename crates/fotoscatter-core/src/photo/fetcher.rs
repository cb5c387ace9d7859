use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::config::AppConfig;
use crate::{Error, Result};

const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP client for downloading photo images
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    /// Create a new image fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.request_timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client })
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("image/png,image/jpeg,image/gif,image/webp,image/*;q=0.8"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers
    }

    /// Validate that a photo URL parses before it is stored
    pub fn validate_url(url: &str) -> Result<String> {
        Url::parse(url)?;
        Ok(url.to_string())
    }

    /// Download raw image bytes from a photo URL
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        tracing::debug!(url, "downloading image");

        let response = self
            .client
            .get(url)
            .headers(Self::build_headers())
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(Error::Image(format!(
                "image too large: {} bytes (max {})",
                bytes.len(),
                MAX_IMAGE_BYTES
            )));
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_url_accepts_http_and_rejects_garbage() {
        assert!(ImageFetcher::validate_url("https://picsum.photos/400/400?random=1").is_ok());
        assert!(ImageFetcher::validate_url("not a url").is_err());
    }
}
