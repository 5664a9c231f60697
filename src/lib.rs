//! ppx-builder - Proxifier profile builder
//!
//! Downloads a public SOCKS5 list, optionally drops hosts a reputation
//! service flags as proxy/VPN/hosting, probes the rest one by one and
//! writes the working ones into a `.ppx` profile.

pub mod error;
pub mod generator;
pub mod profile;
pub mod proxy;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use generator::{GenerationOutcome, ProfileGenerator};
pub use profile::ProfileRenderer;
pub use proxy::*;

use std::path::PathBuf;

/// Default number of working proxies to collect before stopping
pub const DEFAULT_MAX_GOOD: usize = 100;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Source list download settings
    pub fetcher: FetcherConfig,
    /// Reputation lookup settings
    pub reputation: ReputationConfig,
    /// Whether to run the reputation filter at all
    pub use_reputation: bool,
    /// Connectivity probe settings
    pub checker: CheckerConfig,
    /// Stop probing once this many proxies work
    pub max_good: usize,
    /// Where the profile is written
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            reputation: ReputationConfig::default(),
            use_reputation: false,
            checker: CheckerConfig::default(),
            max_good: DEFAULT_MAX_GOOD,
            output_path: PathBuf::from(profile::DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetcher(mut self, fetcher: FetcherConfig) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Set the reputation settings and enable the filter
    pub fn with_reputation(mut self, reputation: ReputationConfig) -> Self {
        self.reputation = reputation;
        self.use_reputation = true;
        self
    }

    pub fn with_checker(mut self, checker: CheckerConfig) -> Self {
        self.checker = checker;
        self
    }

    pub fn with_max_good(mut self, max_good: usize) -> Self {
        self.max_good = max_good;
        self
    }

    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_good, DEFAULT_MAX_GOOD);
        assert_eq!(config.output_path, PathBuf::from("proxy_profile.ppx"));
        assert!(!config.use_reputation);
    }

    #[test]
    fn test_config_with_reputation_enables_filter() {
        let config = Config::new()
            .with_reputation(ReputationConfig::new().with_max_hosts(10))
            .with_max_good(5);
        assert!(config.use_reputation);
        assert_eq!(config.reputation.max_hosts, 10);
        assert_eq!(config.max_good, 5);
    }
}
