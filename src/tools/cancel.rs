//! Cancel tool implementation

use serde_json::Value;
use tokio::time::{timeout, Duration};

use crate::cli::CancelArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::search;
use crate::state::AppState;

use super::TOOL_TIMEOUT_SECS;

pub async fn handle_cancel(state: &AppState, id: Option<Value>, args: Value) -> McpResponse {
    match timeout(Duration::from_secs(TOOL_TIMEOUT_SECS), handle_cancel_impl(state, args)).await {
        Ok(Ok(content)) => McpResponse::success(id, serde_json::to_value(content).unwrap_or_default()),
        Ok(Err(e)) => McpResponse::error(id, e.error_code(), &e.message()),
        Err(_) => McpResponse::error(id, "timeout", "Cancel request timed out"),
    }
}

async fn handle_cancel_impl(state: &AppState, args: Value) -> Result<ToolResult, AppError> {
    let cancel_args: CancelArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;
    execute_cancel(state, cancel_args).await
}

/// Execute cancellation; idempotent by design
pub async fn execute_cancel(state: &AppState, args: CancelArgs) -> Result<ToolResult, AppError> {
    search::clear_session(&state.sessions, args.user);
    Ok(ToolResult::text("Search cancelled."))
}
