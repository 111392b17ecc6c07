//! Status endpoint probing: client setup, pre-flight check, and the paced
//! request loop.
mod client;
mod config;
mod pacing;
mod runner;
mod status;

#[cfg(test)]
mod tests;

pub use client::build_client;
pub use config::BenchmarkConfig;
pub use runner::{RunResult, run_probe_loop};
pub use status::preflight;

pub(crate) use pacing::Pacer;
