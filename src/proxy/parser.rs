//! Parser for newline-delimited `host:port` proxy lists

use crate::proxy::models::Candidate;

/// Proxy parser for turning list text into candidates
pub struct ProxyParser;

impl ProxyParser {
    /// Parse a single proxy line
    ///
    /// Blank lines and `#` comments yield nothing. Otherwise the line is
    /// split on `:` and the first two fields become host and port; any
    /// further fields are ignored.
    pub fn parse_line(line: &str) -> Option<Candidate> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let mut parts = line.split(':');
        match (parts.next(), parts.next()) {
            (Some(host), Some(port)) if !host.is_empty() && !port.is_empty() => {
                Some(Candidate::new(host, port))
            }
            _ => None,
        }
    }

    /// Parse candidates from a string (multiple lines), preserving order
    pub fn parse_string(content: &str) -> Vec<Candidate> {
        content.lines().filter_map(Self::parse_line).collect()
    }
}
