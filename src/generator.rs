//! End-to-end profile generation: fetch, filter, probe, render

use crate::error::Result;
use crate::profile::{assign_ids, write_profile, ProfileRenderer};
use crate::proxy::checker::{Probe, ProxyChecker};
use crate::proxy::fetcher::SourceFetcher;
use crate::proxy::models::{Candidate, ProxyCheckResult};
use crate::proxy::reputation::ReputationFilter;
use crate::Config;
use log::info;
use std::path::PathBuf;

/// How a generation run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The profile was written with this many proxies
    Written { path: PathBuf, proxies: usize },
    /// Nothing passed the probe, so no file was written
    NoneAccepted,
}

/// Probe candidates in order until `max_good` of them work
///
/// Candidates after the last needed success are never probed. The callback
/// sees every probe result as it arrives.
pub async fn collect_working<P, F>(
    probe: &P,
    candidates: Vec<Candidate>,
    max_good: usize,
    mut on_result: F,
) -> Vec<Candidate>
where
    P: Probe + ?Sized,
    F: FnMut(&ProxyCheckResult),
{
    let mut good = Vec::new();
    if max_good == 0 {
        return good;
    }

    for candidate in candidates {
        let result = probe.probe(&candidate).await;
        on_result(&result);

        if result.is_working() {
            good.push(result.candidate);
            if good.len() >= max_good {
                break;
            }
        }
    }

    good
}

/// Runs the whole pipeline with a pluggable probe
pub struct ProfileGenerator<P = ProxyChecker> {
    config: Config,
    probe: P,
}

impl ProfileGenerator<ProxyChecker> {
    /// Create a generator that probes through real SOCKS5 connections
    pub fn new(config: Config) -> Self {
        let probe = ProxyChecker::with_config(config.checker.clone());
        Self { config, probe }
    }
}

impl<P: Probe> ProfileGenerator<P> {
    /// Create a generator with a custom probe
    pub fn with_probe(config: Config, probe: P) -> Self {
        Self { config, probe }
    }

    /// Fetch the source list and apply the reputation filter if enabled
    pub async fn candidates(&self) -> Result<Vec<Candidate>> {
        let fetcher = SourceFetcher::with_config(self.config.fetcher.clone())?;
        let candidates = fetcher.fetch().await?;
        println!("Fetched {} candidates from {}", candidates.len(), fetcher.source_url());

        if !self.config.use_reputation {
            return Ok(candidates);
        }

        let filter = ReputationFilter::with_config(self.config.reputation.clone());
        let hosts: Vec<String> = candidates.iter().map(|c| c.host.clone()).collect();
        let accepted = filter.filter(&hosts).await;

        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| accepted.contains(&c.host))
            .collect();
        println!("{} candidates passed the reputation check", filtered.len());
        Ok(filtered)
    }

    /// Run the pipeline and write the profile if anything was accepted
    pub async fn run(&self) -> Result<GenerationOutcome> {
        let candidates = self.candidates().await?;
        let total = candidates.len();
        let max_good = self.config.max_good;

        let mut checked = 0usize;
        let mut found = 0usize;
        let working = collect_working(&self.probe, candidates, max_good, |result| {
            checked += 1;
            if result.is_working() {
                found += 1;
                println!(
                    "[{}/{}] {} ok ({}ms) - {}/{} found",
                    checked,
                    total,
                    result.candidate,
                    result.response_time_ms.unwrap_or_default(),
                    found,
                    max_good
                );
            } else {
                println!("[{}/{}] {} {}", checked, total, result.candidate, result.status);
            }
        })
        .await;

        info!("Probed {} of {} candidates, {} working", checked, total, working.len());

        if working.is_empty() {
            println!("No working proxies found; {} not written", self.config.output_path.display());
            return Ok(GenerationOutcome::NoneAccepted);
        }

        let accepted = assign_ids(working);
        let document = ProfileRenderer::render(&accepted)?;
        write_profile(&self.config.output_path, &document)?;

        println!(
            "Wrote {} proxies to {}",
            accepted.len(),
            self.config.output_path.display()
        );
        Ok(GenerationOutcome::Written {
            path: self.config.output_path.clone(),
            proxies: accepted.len(),
        })
    }
}
