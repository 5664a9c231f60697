//! Source fetcher for downloading the candidate proxy list
//!
//! The list is plain text with one `host:port` entry per line. A failed
//! download is an error; individual malformed lines are skipped by the
//! parser.

use crate::error::{Error, Result};
use crate::proxy::models::Candidate;
use crate::proxy::parser::ProxyParser;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

/// Default timeout for fetching the source list in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default public SOCKS5 list
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/TheSpeedX/SOCKS-List/master/socks5.txt";

/// Default user agent for HTTP requests
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for the source fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// URL of the proxy list
    pub source_url: String,
    /// Timeout for the download
    pub timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_url(mut self, url: String) -> Self {
        self.source_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Downloads and parses the candidate list
pub struct SourceFetcher {
    config: FetcherConfig,
    client: Client,
}

impl SourceFetcher {
    /// Create a new fetcher with custom configuration
    pub fn with_config(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|source| Error::Retrieval {
                url: config.source_url.clone(),
                source,
            })?;

        Ok(Self { config, client })
    }

    /// The configured source URL
    pub fn source_url(&self) -> &str {
        &self.config.source_url
    }

    /// Fetch the configured list and parse it into candidates
    pub async fn fetch(&self) -> Result<Vec<Candidate>> {
        let url = &self.config.source_url;
        info!("Fetching proxy list from {}", url);

        let content = self.fetch_text(url).await?;
        let candidates = ProxyParser::parse_string(&content);

        info!("Parsed {} candidates from {}", candidates.len(), url);
        Ok(candidates)
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let retrieval = |source| Error::Retrieval {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(retrieval)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let text = response.text().await.map_err(retrieval)?;
        debug!("Downloaded {} bytes from {}", text.len(), url);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_port_addr, serve_once};

    #[test]
    fn test_fetcher_config_default() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_fetcher_config_builder() {
        let config = FetcherConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_source_url("http://localhost/list.txt".to_string());

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.source_url, "http://localhost/list.txt");
    }

    #[tokio::test]
    async fn test_fetch_parses_list() {
        let (base, server) = serve_once(
            "200 OK",
            "# socks5 list\n1.2.3.4:1080\n\nbadline\n5.6.7.8:1081:extra\n",
        )
        .await;

        let config = FetcherConfig::new().with_source_url(format!("{}/socks5.txt", base));
        let fetcher = SourceFetcher::with_config(config).unwrap();
        let candidates = fetcher.fetch().await.unwrap();

        assert_eq!(
            candidates,
            vec![
                Candidate::new("1.2.3.4", "1080"),
                Candidate::new("5.6.7.8", "1081"),
            ]
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /socks5.txt HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let (base, _server) = serve_once("404 Not Found", "missing").await;

        let config = FetcherConfig::new().with_source_url(format!("{}/socks5.txt", base));
        let fetcher = SourceFetcher::with_config(config).unwrap();
        let err = fetcher.fetch().await.unwrap_err();

        assert!(err.is_retrieval());
        assert!(matches!(err, Error::Status { status, .. } if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let addr = closed_port_addr().await;

        let config = FetcherConfig::new()
            .with_source_url(format!("http://{}/socks5.txt", addr))
            .with_timeout(Duration::from_secs(5));
        let fetcher = SourceFetcher::with_config(config).unwrap();
        let err = fetcher.fetch().await.unwrap_err();

        assert!(matches!(err, Error::Retrieval { .. }));
    }
}
