//! Proxy checker module for probing candidates through a SOCKS5 tunnel

use crate::proxy::models::{Candidate, ProxyCheckResult};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Proxy as ReqwestProxy, StatusCode};
use std::time::{Duration, Instant};

/// Default timeout for proxy checks in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default URL to test proxies against
pub const DEFAULT_TEST_URL: &str = "https://www.google.com/";

/// Configuration for proxy checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Timeout for each proxy check
    pub timeout: Duration,
    /// URL to test proxies against
    pub test_url: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            test_url: DEFAULT_TEST_URL.to_string(),
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_test_url(mut self, url: String) -> Self {
        self.test_url = url;
        self
    }
}

/// A single connectivity check for one candidate
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, candidate: &Candidate) -> ProxyCheckResult;
}

/// Probes candidates by fetching the test URL through them
#[derive(Debug, Clone, Default)]
pub struct ProxyChecker {
    config: CheckerConfig,
}

impl ProxyChecker {
    /// Create a new proxy checker with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new proxy checker with custom configuration
    pub fn with_config(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Check a single candidate
    pub async fn check_proxy(&self, candidate: &Candidate) -> ProxyCheckResult {
        let start = Instant::now();

        let client = match self.create_client(candidate) {
            Ok(client) => client,
            Err(e) => return ProxyCheckResult::failed(candidate.clone(), e.to_string()),
        };

        match tokio::time::timeout(self.config.timeout, client.get(&self.config.test_url).send())
            .await
        {
            Ok(Ok(response)) if is_reachable(response.status()) => {
                let elapsed = start.elapsed().as_millis() as u64;
                ProxyCheckResult::working(candidate.clone(), elapsed)
            }
            Ok(Ok(response)) => ProxyCheckResult::failed(
                candidate.clone(),
                format!("HTTP status: {}", response.status()),
            ),
            Ok(Err(e)) if e.is_timeout() => ProxyCheckResult::timeout(candidate.clone()),
            Ok(Err(e)) => ProxyCheckResult::failed(candidate.clone(), e.to_string()),
            Err(_) => ProxyCheckResult::timeout(candidate.clone()),
        }
    }

    /// Create a reqwest client tunneling through the candidate
    fn create_client(&self, candidate: &Candidate) -> reqwest::Result<Client> {
        let proxy = ReqwestProxy::all(candidate.url())?;

        Client::builder()
            .proxy(proxy)
            .timeout(self.config.timeout)
            .pool_max_idle_per_host(0)
            .build()
    }
}

#[async_trait]
impl Probe for ProxyChecker {
    async fn probe(&self, candidate: &Candidate) -> ProxyCheckResult {
        let result = self.check_proxy(candidate).await;
        debug!("Probe {} -> {}", candidate, result.status);
        result
    }
}

/// Only an exact 200 counts as reachable
fn is_reachable(status: StatusCode) -> bool {
    status == StatusCode::OK
}
