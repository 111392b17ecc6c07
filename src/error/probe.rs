use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Node URL '{url}' cannot be used as a base for '/status'.")]
    CannotBeBase { url: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Node is not reachable at {url}: {source}")]
    NodeUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Node at {url} answered status check with HTTP {status}.")]
    UnexpectedStatus { url: String, status: u16 },
}
