//! HTTP transport implementation.
//!
//! Stateless JSON-RPC over POST so standard HTTP clients (curl, browsers,
//! etc.) can talk to the server. Every request is answered by the same
//! shared `McpServer` the other transports use.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::StatusCode;
use rmcp::{
    ServerHandler,
    model::{
        CallToolRequestParam, ListResourcesResult, ListToolsResult, ReadResourceRequestParam,
    },
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::tools::ToolError;

const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_REQUEST: i32 = -32600;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;
const RESOURCE_NOT_FOUND: i32 = -32002;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Serialize `result` into a success response.
    fn from_serializable<T: Serialize>(id: Option<Value>, result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router serving `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
        };

        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Run the HTTP transport until the process is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr,
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

/// Root handler - describes the endpoint.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle one JSON-RPC message.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, Json(request): Json<JsonRpcRequest>) -> Response {
    tracing::Span::current().record("method", request.method.as_str());

    if request.method.starts_with("notifications/") {
        debug!("Received notification: {}", request.method);
        return StatusCode::ACCEPTED.into_response();
    }

    let response = process_request(&state.server, request).await;
    (StatusCode::OK, Json(response)).into_response()
}

async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::error(request.id, INVALID_REQUEST, "Invalid Request");
    }

    let JsonRpcRequest {
        id, method, params, ..
    } = request;

    match method.as_str() {
        "initialize" => JsonRpcResponse::from_serializable(id, &server.get_info()),
        "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
        "tools/list" => JsonRpcResponse::from_serializable(
            id,
            &ListToolsResult {
                tools: server.list_tools(),
                next_cursor: None,
                meta: None,
            },
        ),
        "tools/call" => {
            let params: CallToolRequestParam = match parse_params(params) {
                Ok(p) => p,
                Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, message),
            };
            match server.call_tool(&params.name, params.arguments).await {
                Ok(result) => JsonRpcResponse::from_serializable(id, &result),
                Err(e @ ToolError::NotFound(_)) => {
                    JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())
                }
                Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            }
        }
        "resources/list" => JsonRpcResponse::from_serializable(
            id,
            &ListResourcesResult {
                resources: server.list_resources(),
                next_cursor: None,
                meta: None,
            },
        ),
        "resources/read" => {
            let params: ReadResourceRequestParam = match parse_params(params) {
                Ok(p) => p,
                Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, message),
            };
            match server.read_resource(&params.uri).await {
                Ok(result) => JsonRpcResponse::from_serializable(id, &result),
                Err(e) if e.is_not_found() => {
                    JsonRpcResponse::error(id, RESOURCE_NOT_FOUND, e.to_string())
                }
                Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            }
        }
        _ => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::error(id, METHOD_NOT_FOUND, "Method not found")
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, String> {
    let params = params.ok_or_else(|| "Missing params".to_string())?;
    serde_json::from_value(params).map_err(|e| format!("Invalid params: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use axum::body::Body;
    use bytes::Bytes;
    use http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    async fn app() -> Router {
        let server = McpServer::with_sample_data(Config::default()).await.unwrap();
        HttpTransport::new(HttpConfig::default()).router(server)
    }

    async fn rpc(app: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes: Bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_initialize_reports_capabilities() {
        let (status, body) = rpc(
            app().await,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["serverInfo"]["name"], "mcp-demo-server");
        assert!(body["result"]["capabilities"]["tools"].is_object());
        assert!(body["result"]["capabilities"]["resources"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let (_, body) = rpc(
            app().await,
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        )
        .await;
        let names: Vec<_> = body["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["get_weather", "calculate", "query_users", "add_user"]);
    }

    #[tokio::test]
    async fn test_tools_call() {
        let (_, body) = rpc(
            app().await,
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "calculate", "arguments": {"expression": "(1 + 2) * 3"}}
            }),
        )
        .await;
        assert_eq!(body["id"], 3);
        assert_eq!(body["result"]["content"][0]["text"], "(1 + 2) * 3 = 9");
    }

    #[tokio::test]
    async fn test_handler_failure_is_result_not_error() {
        let (_, body) = rpc(
            app().await,
            json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": {"name": "calculate", "arguments": {"expression": "1 / 0"}}
            }),
        )
        .await;
        assert!(body.get("error").is_none());
        assert_eq!(body["result"]["isError"], true);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let (_, body) = rpc(
            app().await,
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {"name": "nope", "arguments": {}}
            }),
        )
        .await;
        assert_eq!(body["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_resources_read() {
        let app = app().await;
        let (_, listed) = rpc(
            app.clone(),
            json!({"jsonrpc": "2.0", "id": 6, "method": "resources/list"}),
        )
        .await;
        assert_eq!(listed["result"]["resources"][0]["uri"], "db://users");

        let (_, read) = rpc(
            app.clone(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "resources/read",
                "params": {"uri": "db://users"}
            }),
        )
        .await;
        let text = read["result"]["contents"][0]["text"].as_str().unwrap();
        let users: Vec<Value> = serde_json::from_str(text).unwrap();
        assert_eq!(users.len(), 3);

        let (_, missing) = rpc(
            app,
            json!({
                "jsonrpc": "2.0",
                "id": 8,
                "method": "resources/read",
                "params": {"uri": "db://missing"}
            }),
        )
        .await;
        assert_eq!(missing["error"]["code"], RESOURCE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let app = app().await;
        let (_, unknown) = rpc(
            app.clone(),
            json!({"jsonrpc": "2.0", "id": 9, "method": "prompts/list"}),
        )
        .await;
        assert_eq!(unknown["error"]["code"], METHOD_NOT_FOUND);

        let (_, bad_version) = rpc(
            app.clone(),
            json!({"jsonrpc": "1.0", "id": 10, "method": "ping"}),
        )
        .await;
        assert_eq!(bad_version["error"]["code"], INVALID_REQUEST);

        let (status, _) = rpc(
            app,
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }
}
