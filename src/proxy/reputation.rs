//! Reputation filter backed by the proxycheck.io batch API
//!
//! Hosts are submitted in one POST and the per-host records are reduced to
//! a single "flagged" verdict. Any failure of the lookup yields an empty
//! accepted set, so nothing passes when the service cannot vouch for it.

use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::time::Duration;

/// Default timeout for the reputation lookup in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on hosts submitted in one batch
const DEFAULT_MAX_HOSTS: usize = 500;

/// Default reputation endpoint
pub const DEFAULT_ENDPOINT: &str = "https://proxycheck.io/v2/";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "PROXYCHECK_API_KEY";

/// Configuration for the reputation filter
#[derive(Debug, Clone)]
pub struct ReputationConfig {
    /// Endpoint receiving the batched POST
    pub endpoint: String,
    /// API key, sent as the `key` query parameter when present
    pub api_key: Option<String>,
    /// Timeout for the lookup
    pub timeout: Duration,
    /// Maximum number of hosts submitted
    pub max_hosts: usize,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_hosts: DEFAULT_MAX_HOSTS,
        }
    }
}

impl ReputationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_hosts(mut self, max_hosts: usize) -> Self {
        self.max_hosts = max_hosts;
        self
    }
}

/// A flag value as the service reports it: a boolean or a `"yes"`/`"no"` string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    /// Whether the flag is raised; unrecognized strings count as raised
    pub fn is_set(&self) -> bool {
        match self {
            FlagValue::Bool(value) => *value,
            FlagValue::Text(text) => !is_negative_text(text),
        }
    }
}

/// Per-host record returned by the reputation service
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReputationRecord {
    /// Object record exposing `proxy` and `hosting` flags
    Structured {
        #[serde(default)]
        proxy: Option<FlagValue>,
        #[serde(default)]
        hosting: Option<FlagValue>,
    },
    /// Bare boolean, number or string standing in for the whole verdict
    Scalar(Value),
}

impl ReputationRecord {
    /// Whether the host is flagged as proxy, VPN or hosting
    pub fn is_flagged(&self) -> bool {
        match self {
            ReputationRecord::Structured { proxy, hosting } => {
                let raised = |flag: &Option<FlagValue>| flag.as_ref().is_some_and(FlagValue::is_set);
                raised(proxy) || raised(hosting)
            }
            ReputationRecord::Scalar(value) => !is_negative_scalar(value),
        }
    }
}

fn is_negative_scalar(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => is_negative_text(s),
        _ => false,
    }
}

/// `"no"`, `"0"` and `"false"` in any case; anything else counts as raised
fn is_negative_text(text: &str) -> bool {
    let text = text.trim();
    text.eq_ignore_ascii_case("no") || text == "0" || text.eq_ignore_ascii_case("false")
}

/// Reduce a response body to the set of hosts that are not flagged
///
/// Only keys that were submitted are considered, which skips the
/// top-level `status` and `message` fields.
pub fn accepted_hosts(response: &Map<String, Value>, submitted: &[String]) -> HashSet<String> {
    submitted
        .iter()
        .filter(|host| {
            let Some(raw) = response.get(host.as_str()) else {
                debug!("{} missing from reputation response", host);
                return false;
            };
            match ReputationRecord::deserialize(raw) {
                Ok(record) if !record.is_flagged() => true,
                Ok(_) => {
                    debug!("{} flagged by reputation service", host);
                    false
                }
                Err(e) => {
                    debug!("{} has an unreadable reputation record: {}", host, e);
                    false
                }
            }
        })
        .cloned()
        .collect()
}

/// Filters hosts through the reputation service
pub struct ReputationFilter {
    config: ReputationConfig,
}

impl ReputationFilter {
    pub fn with_config(config: ReputationConfig) -> Self {
        Self { config }
    }

    /// Look up the hosts and return those not flagged
    ///
    /// Only the first `max_hosts` entries are submitted. Errors are logged
    /// and produce an empty set.
    pub async fn filter(&self, hosts: &[String]) -> HashSet<String> {
        let submitted = &hosts[..hosts.len().min(self.config.max_hosts)];
        if submitted.is_empty() {
            return HashSet::new();
        }

        match self.lookup(submitted).await {
            Ok(response) => {
                let accepted = accepted_hosts(&response, submitted);
                info!(
                    "Reputation check: {} submitted, {} accepted",
                    submitted.len(),
                    accepted.len()
                );
                accepted
            }
            Err(e) => {
                warn!("Reputation check failed, accepting no hosts: {}", e);
                HashSet::new()
            }
        }
    }

    async fn lookup(&self, hosts: &[String]) -> anyhow::Result<Map<String, Value>> {
        let client = Client::builder().timeout(self.config.timeout).build()?;

        let mut query = vec![("vpn", "1"), ("risk", "1")];
        if let Some(key) = &self.config.api_key {
            query.push(("key", key.as_str()));
        }
        let ips = hosts.join(",");

        let response = client
            .post(&self.config.endpoint)
            .query(&query)
            .form(&[("ips", ips.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let map: Map<String, Value> = serde_json::from_str(&body)?;
        Ok(map)
    }
}
