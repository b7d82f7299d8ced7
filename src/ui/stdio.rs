//! JSON-lines request loop.
//!
//! Each input line is one request tagged by `op`; each output line is the
//! matching response, or `{"error": "..."}`. A bad line never ends the loop.

use crate::core::error::{Error, Result};
use crate::service::{CodebaseIndex, QueryRequest};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    Scan {
        #[serde(rename = "projectPath", default)]
        project_path: String,
    },
    Query(QueryRequest),
    Status {
        #[serde(rename = "projectPath", default)]
        project_path: String,
    },
    Unlink {
        #[serde(rename = "projectPath", default)]
        project_path: String,
    },
}

/// Execute one request against the service
pub async fn handle_request(service: &CodebaseIndex, request: Request) -> Result<Value> {
    let value = match request {
        Request::Scan { project_path } => to_value(service.scan(&project_path).await?)?,
        Request::Query(query) => to_value(service.query(&query)?)?,
        Request::Status { project_path } => to_value(service.status(&project_path))?,
        Request::Unlink { project_path } => {
            let removed = service.unlink(&project_path);
            json!({ "ok": true, "removed": removed })
        }
    };
    Ok(value)
}

/// Parse and execute one line, folding any failure into an error response
pub async fn handle_line(service: &CodebaseIndex, line: &str) -> Value {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return error_response(&format!("Invalid request: {}", e)),
    };

    match handle_request(service, request).await {
        Ok(value) => value,
        Err(e) => {
            match &e {
                Error::InvalidInput(_)
                | Error::NotFound(_)
                | Error::NotADirectory(_)
                | Error::NotIndexed(_) => debug!("Request rejected: {}", e),
                _ => error!("Request failed: {}", e),
            }
            error_response(&e.to_string())
        }
    }
}

/// Serve requests from `reader` until end of input
pub async fn run<R, W>(service: &CodebaseIndex, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(service, &line).await;
        let mut encoded = response.to_string();
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| Error::Unknown(format!("Failed to serialize response: {}", e)))
}

fn error_response(message: &str) -> Value {
    json!({ "error": message })
}
