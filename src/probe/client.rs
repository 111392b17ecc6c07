use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::ProbeError;

use super::BenchmarkConfig;

/// Builds the HTTP client shared by the pre-flight check and the probe loop.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(config: &BenchmarkConfig) -> Result<Client, ProbeError> {
    Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.request_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| ProbeError::BuildClientFailed { source: err })
}
