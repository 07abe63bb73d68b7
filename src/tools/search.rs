//! Search tool implementation
//!
//! Runs a fuzzy customer search for a user, opens their session, and
//! renders page 0.

use serde_json::Value;
use tokio::time::{timeout, Duration};
use tracing::info;

use crate::cli::SearchArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::search::{self, MIN_SIMILARITY};
use crate::state::AppState;

use super::render::render_search_page;
use super::{NAV_PAGE_SIZE, SEARCH_FETCH_LIMIT, TOOL_TIMEOUT_SECS};

pub async fn handle_search(state: &AppState, id: Option<Value>, args: Value) -> McpResponse {
    match timeout(Duration::from_secs(TOOL_TIMEOUT_SECS), handle_search_impl(state, args)).await {
        Ok(Ok(content)) => McpResponse::success(id, serde_json::to_value(content).unwrap_or_default()),
        Ok(Err(e)) => McpResponse::error(id, e.error_code(), &e.message()),
        Err(_) => McpResponse::error(id, "timeout", "Search request timed out"),
    }
}

async fn handle_search_impl(state: &AppState, args: Value) -> Result<ToolResult, AppError> {
    let search_args: SearchArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;
    execute_search(state, search_args).await
}

/// Execute search (shared implementation for server and CLI modes)
pub async fn execute_search(state: &AppState, args: SearchArgs) -> Result<ToolResult, AppError> {
    let query = args.query.trim().to_string();

    let mut results = {
        let snapshot = state.snapshot.read().await;
        search::search(&query, &snapshot, MIN_SIMILARITY)
    };
    // Upstream fetch cap, independent of the 5-per-page slicing below.
    results.truncate(SEARCH_FETCH_LIMIT);

    info!("Search '{}' for user {}: {} candidates", query, args.user, results.len());

    if results.is_empty() {
        return Ok(ToolResult::text(format!(
            "No customers found for '{}'.",
            query
        )));
    }

    let total = results.len();
    search::start_session(&state.sessions, args.user, results);
    let (items, has_more) = search::get_page(&state.sessions, args.user, 0, NAV_PAGE_SIZE);
    let summary = search::page_summary(&query, total, 0, NAV_PAGE_SIZE);

    Ok(ToolResult::text(render_search_page(&summary, &items, has_more)))
}
