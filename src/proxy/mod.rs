//! Proxy module for fetching, filtering and checking candidates
//!
//! This module provides functionality for:
//! - Downloading and parsing a `host:port` list
//! - Filtering hosts through a reputation service
//! - Probing candidates through a SOCKS5 tunnel

pub mod checker;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod reputation;

pub use checker::{CheckerConfig, Probe, ProxyChecker};
pub use fetcher::{FetcherConfig, SourceFetcher};
pub use models::{AcceptedProxy, Candidate, ProxyCheckResult, ProxyCheckStatus};
pub use parser::ProxyParser;
pub use reputation::{FlagValue, ReputationConfig, ReputationFilter, ReputationRecord};
