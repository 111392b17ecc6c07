use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Url};
use tokio::time::Instant;
use tracing::debug;

use super::{BenchmarkConfig, Pacer};

/// Progress callbacks fire after every this many iterations.
pub const PROGRESS_INTERVAL: u64 = 100;

const MICROS_PER_SEC_X100: u128 = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Transport,
    Status(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Failure(FailureKind),
}

impl ProbeOutcome {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }
}

/// Counters for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    pub success_count: u64,
    pub failure_count: u64,
    pub duration: Duration,
}

impl RunResult {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.success_count.saturating_add(self.failure_count)
    }

    /// Successful requests per second, scaled by 100. Zero for an empty run.
    #[must_use]
    pub fn actual_rate_x100(&self) -> u64 {
        let micros = self.duration.as_micros();
        if micros == 0 {
            return 0;
        }
        let scaled = u128::from(self.success_count)
            .saturating_mul(MICROS_PER_SEC_X100)
            .checked_div(micros)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

/// One GET against the status endpoint. Any 2xx with a readable body is a
/// success; everything else is a failure.
pub async fn probe_once(client: &Client, status_url: &Url) -> ProbeOutcome {
    let response = match client.get(status_url.clone()).send().await {
        Ok(response) => response,
        Err(err) => {
            debug!("Request failed: {}", err);
            return ProbeOutcome::Failure(classify(&err));
        }
    };

    let status = response.status();
    if let Err(err) = drain_response_body(response).await {
        debug!("Failed to read response body: {}", err);
        return ProbeOutcome::Failure(classify(&err));
    }

    if status.is_success() {
        ProbeOutcome::Success
    } else {
        debug!("Unexpected status: {}", status);
        ProbeOutcome::Failure(FailureKind::Status(status.as_u16()))
    }
}

/// Runs `request_count` paced probes and returns the tally.
///
/// `on_progress` receives the number of requests sent so far every
/// [`PROGRESS_INTERVAL`] iterations.
pub async fn run_probe_loop<F>(
    client: &Client,
    status_url: &Url,
    config: &BenchmarkConfig,
    mut on_progress: F,
) -> RunResult
where
    F: FnMut(u64),
{
    let pacer = Pacer::new(config.target_rate);
    debug!(
        "Pacing {} requests at {:?} per request",
        config.request_count,
        pacer.interval()
    );

    let run_start = Instant::now();
    let mut result = RunResult::default();

    for sent in 1..=config.request_count {
        let iteration_start = Instant::now();

        if probe_once(client, status_url).await.is_success() {
            result.success_count = result.success_count.saturating_add(1);
        } else {
            result.failure_count = result.failure_count.saturating_add(1);
        }

        pacer.pace(iteration_start).await;

        if sent.checked_rem(PROGRESS_INTERVAL) == Some(0) {
            on_progress(sent);
        }
    }

    result.duration = run_start.elapsed();
    result
}

fn classify(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Transport
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
