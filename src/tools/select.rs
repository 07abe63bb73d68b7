//! Select tool implementation
//!
//! Resolves a result number to a customer and returns their full debt
//! history. A successful selection consumes the session.

use serde_json::Value;
use tokio::time::{timeout, Duration};
use tracing::info;

use crate::cli::SelectArgs;
use crate::error::AppError;
use crate::mcp::{ContentItem, McpResponse, ToolResult};
use crate::search::{self, customer_detail};
use crate::state::AppState;

use super::render::render_customer_detail;
use super::TOOL_TIMEOUT_SECS;

pub async fn handle_select(state: &AppState, id: Option<Value>, args: Value) -> McpResponse {
    match timeout(Duration::from_secs(TOOL_TIMEOUT_SECS), handle_select_impl(state, args)).await {
        Ok(Ok(content)) => McpResponse::success(id, serde_json::to_value(content).unwrap_or_default()),
        Ok(Err(e)) => McpResponse::error(id, e.error_code(), &e.message()),
        Err(_) => McpResponse::error(id, "timeout", "Select request timed out"),
    }
}

async fn handle_select_impl(state: &AppState, args: Value) -> Result<ToolResult, AppError> {
    let select_args: SelectArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;
    execute_select(state, select_args).await
}

/// Execute selection (shared implementation for server and CLI modes)
pub async fn execute_select(state: &AppState, args: SelectArgs) -> Result<ToolResult, AppError> {
    let index: usize = args.index.trim().parse().map_err(|_| {
        AppError::InvalidSelection(format!("'{}' is not a result number", args.index))
    })?;

    let candidate = search::resolve(&state.sessions, args.user, index)?;

    let debts = {
        let snapshot = state.snapshot.read().await;
        search::fetch_all_debts(&candidate.customer_name, &candidate.customer_phone, &snapshot)
    };

    info!(
        "User {} selected '{}' ({}): {} records",
        args.user,
        candidate.customer_name,
        candidate.customer_phone,
        debts.len()
    );

    let detail = customer_detail(&candidate.customer_name, &debts);
    let messages = render_customer_detail(&detail);

    // Selection consumes the session.
    search::clear_session(&state.sessions, args.user);

    Ok(ToolResult::from_items(
        messages.into_iter().map(ContentItem::text).collect(),
    ))
}
