use clap::Parser;
use ppx_builder::{
    profile::DEFAULT_OUTPUT_FILE,
    proxy::{checker::DEFAULT_TEST_URL, fetcher::DEFAULT_SOURCE_URL, reputation::API_KEY_ENV},
    CheckerConfig, Config, FetcherConfig, GenerationOutcome, ProfileGenerator, ReputationConfig,
    DEFAULT_MAX_GOOD,
};
use std::path::PathBuf;
use std::time::Duration;

/// Build a Proxifier profile from working public SOCKS5 proxies
#[derive(Parser)]
#[command(name = "ppx-builder")]
#[command(about = "Build a Proxifier profile from working public SOCKS5 proxies")]
struct Cli {
    /// URL of the host:port proxy list
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    source_url: String,

    /// URL fetched through each proxy to test it
    #[arg(long, default_value = DEFAULT_TEST_URL)]
    test_url: String,

    /// Output profile path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Stop after this many working proxies
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_GOOD)]
    max_good: usize,

    /// Probe timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,

    /// Source list and reputation lookup timeout in seconds
    #[arg(long, default_value = "30")]
    fetch_timeout: u64,

    /// Drop hosts flagged as proxy/VPN/hosting by proxycheck.io
    #[arg(long)]
    reputation: bool,

    /// proxycheck.io API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Maximum number of hosts sent to the reputation service
    #[arg(long, default_value = "500")]
    reputation_limit: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> Config {
        let fetch_timeout = Duration::from_secs(self.fetch_timeout);

        let mut config = Config::new()
            .with_fetcher(
                FetcherConfig::new()
                    .with_source_url(self.source_url.clone())
                    .with_timeout(fetch_timeout),
            )
            .with_checker(
                CheckerConfig::new()
                    .with_timeout(Duration::from_secs(self.timeout))
                    .with_test_url(self.test_url.clone()),
            )
            .with_max_good(self.max_good)
            .with_output_path(self.output.clone());

        if self.reputation {
            config = config.with_reputation(
                ReputationConfig::new()
                    .with_api_key(self.api_key.clone())
                    .with_timeout(fetch_timeout)
                    .with_max_hosts(self.reputation_limit),
            );
        }

        config
    }
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn);
    if verbose {
        builder.filter_module("ppx_builder", log::LevelFilter::Debug);
    }
    builder.parse_default_env().init();
}

/// Final diagnostic for a run, if any
///
/// Progress and the outcome are already printed by the generator; only a
/// failed run needs a closing line. Failures never change the exit status.
fn failure_message(result: &ppx_builder::Result<GenerationOutcome>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e) if e.is_retrieval() => Some(format!("Failed to fetch proxy list: {}", e)),
        Err(e) => Some(format!("Profile generation failed: {}", e)),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = cli.to_config();

    println!("Source: {}", config.fetcher.source_url);
    println!("Test URL: {}", config.checker.test_url);
    println!(
        "Collecting up to {} proxies, timeout: {}s",
        config.max_good,
        config.checker.timeout.as_secs()
    );
    if config.use_reputation {
        println!(
            "Reputation filter enabled (first {} hosts)",
            config.reputation.max_hosts
        );
    }
    println!();

    let generator = ProfileGenerator::new(config);
    let result = generator.run().await;
    if let Some(message) = failure_message(&result) {
        println!("{}", message);
    }
}
