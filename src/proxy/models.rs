//! Proxy data models

use std::fmt;

/// First identifier handed out to accepted proxies in a profile
pub const FIRST_PROXY_ID: u32 = 100;

/// A SOCKS5 endpoint parsed from the source list, not yet probed
///
/// Host and port are kept as the raw strings from the list; a malformed
/// port only surfaces when the probe tries to build a proxy URL from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub host: String,
    pub port: String,
}

impl Candidate {
    /// Create a new candidate
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
        }
    }

    /// Get the SOCKS5 proxy URL for this candidate
    pub fn url(&self) -> String {
        format!("socks5://{}:{}", self.host, self.port)
    }

    /// Get the candidate in HOST:PORT format
    pub fn to_simple_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_simple_string())
    }
}

/// A candidate that passed the probe, with its profile identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedProxy {
    pub id: u32,
    pub candidate: Candidate,
}

impl AcceptedProxy {
    pub fn new(id: u32, candidate: Candidate) -> Self {
        Self { id, candidate }
    }

    pub fn host(&self) -> &str {
        &self.candidate.host
    }

    pub fn port(&self) -> &str {
        &self.candidate.port
    }
}

/// Result of proxy check operation
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyCheckStatus {
    Working,
    Failed(String),
    Timeout,
}

impl fmt::Display for ProxyCheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyCheckStatus::Working => write!(f, "ok"),
            ProxyCheckStatus::Failed(reason) => write!(f, "failed ({})", reason),
            ProxyCheckStatus::Timeout => write!(f, "timeout"),
        }
    }
}

/// Detailed result of a proxy check
#[derive(Debug, Clone)]
pub struct ProxyCheckResult {
    pub candidate: Candidate,
    pub status: ProxyCheckStatus,
    pub response_time_ms: Option<u64>,
}

impl ProxyCheckResult {
    pub fn working(candidate: Candidate, response_time_ms: u64) -> Self {
        Self {
            candidate,
            status: ProxyCheckStatus::Working,
            response_time_ms: Some(response_time_ms),
        }
    }

    pub fn failed(candidate: Candidate, error: String) -> Self {
        Self {
            candidate,
            status: ProxyCheckStatus::Failed(error),
            response_time_ms: None,
        }
    }

    pub fn timeout(candidate: Candidate) -> Self {
        Self {
            candidate,
            status: ProxyCheckStatus::Timeout,
            response_time_ms: None,
        }
    }

    pub fn is_working(&self) -> bool {
        matches!(self.status, ProxyCheckStatus::Working)
    }
}
