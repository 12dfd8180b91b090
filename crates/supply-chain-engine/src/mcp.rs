use crate::ingest::DataSource;
use crate::mcp_types::{McpError, McpRequest, McpResponse, INVALID_PARAMS, METHOD_NOT_FOUND};
use crate::render;
use crate::server::SupplyChainEngine;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;

const PROTOCOL_VERSION: &str = "2024-11-05";
const PREVIEW_ROWS: usize = 5;

/// Arguments of the `load_csv` tool. Exactly one of `path` or `content` is expected.
#[derive(Debug, Deserialize)]
pub struct LoadCsvParams {
    pub path: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShortestPathParams {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotQuery {
    ShortestPath,
    MinimumSpanningTree,
}

#[derive(Debug, Deserialize)]
pub struct RenderDotParams {
    pub query: DotQuery,
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// Tool adapter in front of [`SupplyChainEngine`].
pub struct McpServer {
    engine: SupplyChainEngine,
}

impl McpServer {
    pub fn new(engine: SupplyChainEngine) -> Self {
        Self { engine }
    }

    pub fn list_tools(&self) -> Value {
        json!([
            {
                "name": "load_csv",
                "description": "Load an edge table with columns Source, Destination, Cost, replacing the current graph",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "path": { "type": "string" },
                        "content": { "type": "string" }
                    }
                }
            },
            {
                "name": "list_nodes",
                "description": "List the distinct sources and destinations of the loaded graph",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "shortest_path",
                "description": "Cheapest directed route between two nodes",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "source": { "type": "string" },
                        "destination": { "type": "string" }
                    },
                    "required": ["source", "destination"]
                }
            },
            {
                "name": "minimum_spanning_tree",
                "description": "Minimum spanning tree (forest when disconnected) of the undirected network",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "render_dot",
                "description": "Graphviz DOT rendering of a shortest path or the minimum spanning tree",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "enum": ["shortest_path", "minimum_spanning_tree"] },
                        "source": { "type": "string" },
                        "destination": { "type": "string" }
                    },
                    "required": ["query"]
                }
            }
        ])
    }

    /// Dispatches one JSON-RPC request. Notifications (no id) are handled by the caller.
    pub fn handle(&mut self, request: McpRequest) -> McpResponse {
        let id = request.id;
        let outcome = match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": "supply-chain",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.list_tools() })),
            "tools/call" => {
                let params = request.params.unwrap_or_else(|| json!({}));
                let name = params["name"].as_str().unwrap_or("").to_string();
                let arguments = params
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| json!({}));
                self.call_tool(&name, arguments)
            }
            other => Err(McpError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        };

        match outcome {
            Ok(result) => McpResponse::success(id, result),
            Err(error) => McpResponse::failure(id, error),
        }
    }

    pub fn call_tool(&mut self, tool_name: &str, arguments: Value) -> Result<Value, McpError> {
        tracing::debug!(tool = tool_name, "tool call");
        match tool_name {
            "load_csv" => self.load_csv(parse_args(arguments)?),
            "list_nodes" => self.list_nodes(),
            "shortest_path" => self.shortest_path(parse_args(arguments)?),
            "minimum_spanning_tree" => self.minimum_spanning_tree(),
            "render_dot" => self.render_dot(parse_args(arguments)?),
            _ => Err(McpError::new(
                METHOD_NOT_FOUND,
                format!("Tool not found: {}", tool_name),
            )),
        }
    }

    fn load_csv(&mut self, params: LoadCsvParams) -> Result<Value, McpError> {
        let source = match (params.path, params.content) {
            (Some(path), None) => DataSource::File(PathBuf::from(path)),
            (None, Some(content)) => DataSource::Inline(content),
            _ => {
                return Err(McpError::new(
                    INVALID_PARAMS,
                    "load_csv expects exactly one of 'path' or 'content'",
                ))
            }
        };

        let dataset = self.engine.load(&source)?;
        let text = format!(
            "File Uploaded Successfully! {} rows, {} nodes, {} edges",
            dataset.records.len(),
            dataset.graph.node_count(),
            dataset.graph.edge_count()
        );
        Ok(tool_result(
            text,
            json!({
                "rows": dataset.records.len(),
                "nodes": dataset.graph.node_count(),
                "edges": dataset.graph.edge_count(),
                "preview": dataset.preview(PREVIEW_ROWS),
            }),
        ))
    }

    fn list_nodes(&self) -> Result<Value, McpError> {
        let sources = self.engine.list_sources()?;
        let destinations = self.engine.list_destinations()?;
        let text = format!(
            "Sources: {}\nDestinations: {}",
            sources.join(", "),
            destinations.join(", ")
        );
        Ok(tool_result(
            text,
            json!({ "sources": sources, "destinations": destinations }),
        ))
    }

    fn shortest_path(&self, params: ShortestPathParams) -> Result<Value, McpError> {
        let result = self
            .engine
            .shortest_path(&params.source, &params.destination)?;
        Ok(tool_result(render::path_summary(&result), json!(result)))
    }

    fn minimum_spanning_tree(&self) -> Result<Value, McpError> {
        let forest = self.engine.minimum_spanning_tree()?;
        Ok(tool_result(render::spanning_summary(&forest), json!(forest)))
    }

    fn render_dot(&self, params: RenderDotParams) -> Result<Value, McpError> {
        let dot = match params.query {
            DotQuery::ShortestPath => {
                let (Some(source), Some(destination)) = (params.source, params.destination) else {
                    return Err(McpError::new(
                        INVALID_PARAMS,
                        "shortest_path rendering needs 'source' and 'destination'",
                    ));
                };
                let result = self.engine.shortest_path(&source, &destination)?;
                render::path_dot(self.engine.graph()?, &result)
            }
            DotQuery::MinimumSpanningTree => {
                render::spanning_dot(&self.engine.minimum_spanning_tree()?)
            }
        };
        Ok(tool_result(dot, Value::Null))
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, McpError> {
    serde_json::from_value(arguments)
        .map_err(|e| McpError::new(INVALID_PARAMS, format!("Invalid arguments: {}", e)))
}

fn tool_result(text: String, structured: Value) -> Value {
    let mut result = json!({
        "content": [{ "type": "text", "text": text }]
    });
    if !structured.is_null() {
        result["structuredContent"] = structured;
    }
    result
}
