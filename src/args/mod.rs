//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::BenchArgs;
pub use types::{OutputFormat, TargetRate};

pub(crate) use defaults::DEFAULT_USER_AGENT;
