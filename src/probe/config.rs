use std::time::Duration;

use reqwest::Url;

use crate::args::TargetRate;
use crate::error::ProbeError;

const STATUS_PATH: &str = "status";

/// Immutable run parameters, built once from the CLI flags.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub target_url: Url,
    pub request_count: u64,
    pub target_rate: TargetRate,
    pub request_timeout: Duration,
}

impl BenchmarkConfig {
    /// `{target_url}/status`, keeping any base path on the node URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the node URL cannot carry a path.
    pub fn status_url(&self) -> Result<Url, ProbeError> {
        let mut url = self.target_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProbeError::CannotBeBase {
                url: self.target_url.to_string(),
            })?
            .pop_if_empty()
            .push(STATUS_PATH);
        Ok(url)
    }
}
