pub(crate) const DEFAULT_NODE_URL: &str = "http://localhost:26657";
pub(crate) const DEFAULT_REQUEST_COUNT: u64 = 1000;
pub(crate) const DEFAULT_TPS: &str = "100";
pub(crate) const DEFAULT_TIMEOUT: &str = "1s";

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("hcpbench/", env!("CARGO_PKG_VERSION"));
