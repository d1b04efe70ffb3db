//! netcarbs MCP Server Implementation
//!
//! Exposes the net carb calculator and its log as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::nutrition::NetCarbsInput;
use crate::tools::calculations;
use crate::tools::status::StatusTracker;

/// netcarbs MCP Service
#[derive(Clone)]
pub struct NetCarbsService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<NetCarbsService>,
}

impl NetCarbsService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateNetCarbsParams {
    /// Total carbohydrates in grams
    pub total: f64,
    /// Dietary fiber in grams (default 0)
    #[serde(default)]
    pub fiber: f64,
    /// Sugar alcohols (polyols) in grams (default 0)
    #[serde(default)]
    pub polyols: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RunDirectiveParams {
    /// The user's message, e.g. "netcarbs 30 5 10"
    pub text: String,
    /// Store the calculation in the log when the message is a directive (default true)
    #[serde(default = "default_true")]
    pub log: bool,
}

fn default_true() -> bool { true }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogCalculationParams {
    /// Optional label, e.g. product name
    pub label: Option<String>,
    /// Total carbohydrates in grams
    pub total: f64,
    /// Dietary fiber in grams (default 0)
    #[serde(default)]
    pub fiber: f64,
    /// Sugar alcohols (polyols) in grams (default 0)
    #[serde(default)]
    pub polyols: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCalculationParams {
    /// Calculation ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListCalculationsParams {
    /// Maximum results (default 50, max 200)
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    /// Offset for pagination (default 0)
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteCalculationParams {
    /// Calculation ID to delete
    pub id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NetCarbsService {
    #[tool(description = "Get the current status of the netcarbs service including build info, database status, and process information")]
    async fn netcarbs_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for the net carb tools and the netcarbs directive. Call this when unsure how to use the tools.")]
    fn netcarbs_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    #[tool(description = "Calculate net carbs = max(0, total - fiber - 0.5 * polyols) in grams. Nothing is stored.")]
    fn calculate_net_carbs(&self, Parameters(p): Parameters<CalculateNetCarbsParams>) -> Result<CallToolResult, McpError> {
        let breakdown = calculations::calculate(NetCarbsInput::new(p.total, p.fiber, p.polyols));
        to_json(&breakdown)
    }

    #[tool(description = "Handle a chat message of the form 'netcarbs <total> <fiber> <polyols>'. Returns matched=false for any other text.")]
    fn run_netcarbs_directive(&self, Parameters(p): Parameters<RunDirectiveParams>) -> Result<CallToolResult, McpError> {
        let result = calculations::run_directive(&self.database, &p.text, p.log)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Calculate net carbs and store the result in the calculation log")]
    fn log_calculation(&self, Parameters(p): Parameters<LogCalculationParams>) -> Result<CallToolResult, McpError> {
        let input = NetCarbsInput::new(p.total, p.fiber, p.polyols);
        let result = calculations::log_calculation(&self.database, input, p.label)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a logged calculation by ID")]
    fn get_calculation(&self, Parameters(p): Parameters<GetCalculationParams>) -> Result<CallToolResult, McpError> {
        let result = calculations::get_calculation(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(calc) => to_json(&calc),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Calculation not found", "id": {}}}"#,
                p.id
            ))])),
        }
    }

    #[tool(description = "List logged calculations, newest first")]
    fn list_calculations(&self, Parameters(p): Parameters<ListCalculationsParams>) -> Result<CallToolResult, McpError> {
        let result = calculations::list_calculations(&self.database, p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a logged calculation")]
    fn delete_calculation(&self, Parameters(p): Parameters<DeleteCalculationParams>) -> Result<CallToolResult, McpError> {
        let result = calculations::delete_calculation(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NetCarbsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "netcarbs".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Net Carbs Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Net Carbs Calculator - keto net carbohydrate math. \
                 Net carbs = max(0, total - fiber - 0.5 * polyols), all in grams. \
                 Call netcarbs_instructions first if unsure. \
                 calculate_net_carbs for one-off math, run_netcarbs_directive for 'netcarbs <total> <fiber> <polyols>' messages. \
                 Log: log_calculation, get_calculation, list_calculations, delete_calculation. \
                 Status: netcarbs_status."
                    .into(),
            ),
        }
    }
}
