use clap::Parser;
use std::time::Duration;

use crate::error::AppResult;
use crate::probe::BenchmarkConfig;

use super::defaults::{DEFAULT_NODE_URL, DEFAULT_REQUEST_COUNT, DEFAULT_TIMEOUT, DEFAULT_TPS};
use super::parsers::{parse_duration_arg, parse_target_rate, parse_target_url};
use super::types::{OutputFormat, TargetRate};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "hcpbench",
    version,
    about = "Paced HTTP probe for a blockchain node's status endpoint - sends a fixed number of requests at a target TPS and reports success/failure throughput."
)]
pub struct BenchArgs {
    /// Node RPC URL
    #[arg(long, short, default_value = DEFAULT_NODE_URL)]
    pub url: String,

    /// Number of requests to send
    #[arg(long, short = 'n', default_value_t = DEFAULT_REQUEST_COUNT)]
    pub count: u64,

    /// Target requests per second (decimals allowed, e.g. 2.5)
    #[arg(long, default_value = DEFAULT_TPS, value_parser = parse_target_rate)]
    pub tps: TargetRate,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long, default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Summary format
    #[arg(long = "output-format", default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Suppress per-100 progress lines
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl BenchArgs {
    /// Validates the parsed flags and freezes them into a run config.
    ///
    /// # Errors
    ///
    /// Returns an error when the node URL is not an absolute http(s) URL.
    pub fn to_config(&self) -> AppResult<BenchmarkConfig> {
        let target_url = parse_target_url(&self.url)?;
        Ok(BenchmarkConfig {
            target_url,
            request_count: self.count,
            target_rate: self.tps,
            request_timeout: self.timeout,
        })
    }
}
