use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ProbeError;

/// What the pre-flight check learned about the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStatus {
    pub latest_block_height: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusEnvelope {
    #[serde(default)]
    result: Option<StatusResult>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusResult {
    #[serde(default)]
    sync_info: Option<SyncInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct SyncInfo {
    #[serde(default)]
    latest_block_height: Option<Value>,
}

/// Reads `result.sync_info.latest_block_height` from a status body.
///
/// Heights arrive as JSON strings; bare numbers are accepted as well. A
/// missing field yields `None` rather than an error.
///
/// # Errors
///
/// Returns an error when the body is not valid JSON.
pub fn parse_node_status(body: &[u8]) -> Result<NodeStatus, serde_json::Error> {
    let envelope: StatusEnvelope = serde_json::from_slice(body)?;
    let latest_block_height = envelope
        .result
        .and_then(|result| result.sync_info)
        .and_then(|sync| sync.latest_block_height)
        .and_then(|height| match height {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        });
    Ok(NodeStatus {
        latest_block_height,
    })
}

/// Single GET against the status endpoint before any load is sent.
///
/// Only transport failures and non-200 answers abort the run. A body that
/// cannot be read or parsed is logged and reported as an unknown height.
///
/// # Errors
///
/// Returns [`ProbeError::NodeUnreachable`] when the request fails and
/// [`ProbeError::UnexpectedStatus`] when the node answers with anything but 200.
pub async fn preflight(client: &Client, status_url: &Url) -> Result<NodeStatus, ProbeError> {
    let response = client
        .get(status_url.clone())
        .send()
        .await
        .map_err(|err| ProbeError::NodeUnreachable {
            url: status_url.to_string(),
            source: err,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ProbeError::UnexpectedStatus {
            url: status_url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            warn!("Failed to read status body: {}", err);
            return Ok(NodeStatus::default());
        }
    };

    match parse_node_status(&body) {
        Ok(node) => {
            if node.latest_block_height.is_none() {
                warn!("Status response has no result.sync_info.latest_block_height.");
            }
            debug!("Pre-flight status: {:?}", node);
            Ok(node)
        }
        Err(err) => {
            warn!("Status response is not valid JSON: {}", err);
            Ok(NodeStatus::default())
        }
    }
}
