use crate::mcp::McpServer;
use crate::mcp_types::{McpError, McpRequest, McpResponse, PARSE_ERROR};
use serde_json::Value;
use tokio::io::{stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Serves newline-delimited JSON-RPC on stdin/stdout until stdin closes.
pub async fn run_mcp_stdio(server: McpServer) -> anyhow::Result<()> {
    serve_lines(server, BufReader::new(stdin()), stdout()).await
}

pub async fn serve_lines<R, W>(mut server: McpServer, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        // A request with `"id": null` still gets a reply; only a missing `id` key marks a notification.
        let parsed = serde_json::from_str::<Value>(&line).and_then(|value| {
            let is_notification = value.get("id").is_none();
            serde_json::from_value::<McpRequest>(value).map(|request| (request, is_notification))
        });

        let response = match parsed {
            Ok((request, true)) => {
                tracing::debug!(method = %request.method, "notification ignored");
                continue;
            }
            Ok((request, false)) => server.handle(request),
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request");
                McpResponse::failure(None, McpError::new(PARSE_ERROR, format!("Parse error: {}", e)))
            }
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        writer.write_all(&payload).await?;
        writer.flush().await?;
    }

    Ok(())
}
