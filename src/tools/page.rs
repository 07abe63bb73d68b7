//! Page tool implementation
//!
//! Atomic page navigation over an open search session.

use serde_json::Value;
use tokio::time::{timeout, Duration};

use crate::cli::PageArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::search::{self, PageDirection, SessionStore};
use crate::state::AppState;

use super::render::render_search_page;
use super::{NAV_PAGE_SIZE, TOOL_TIMEOUT_SECS};

pub async fn handle_page(state: &AppState, id: Option<Value>, args: Value) -> McpResponse {
    match timeout(Duration::from_secs(TOOL_TIMEOUT_SECS), handle_page_impl(state, args)).await {
        Ok(Ok(content)) => McpResponse::success(id, serde_json::to_value(content).unwrap_or_default()),
        Ok(Err(e)) => McpResponse::error(id, e.error_code(), &e.message()),
        Err(_) => McpResponse::error(id, "timeout", "Page request timed out"),
    }
}

async fn handle_page_impl(state: &AppState, args: Value) -> Result<ToolResult, AppError> {
    let page_args: PageArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;
    execute_page(state, page_args).await
}

fn parse_direction(raw: &str) -> Result<PageDirection, AppError> {
    match raw.trim().to_lowercase().as_str() {
        "next" | "forward" => Ok(PageDirection::Next),
        "prev" | "previous" | "back" => Ok(PageDirection::Prev),
        other => Err(AppError::InvalidInput(format!(
            "direction must be 'next' or 'prev', got '{}'",
            other
        ))),
    }
}

/// Execute page navigation (shared implementation for server and CLI modes)
pub async fn execute_page(state: &AppState, args: PageArgs) -> Result<ToolResult, AppError> {
    let direction = parse_direction(&args.direction)?;
    let (items, has_more) = search::navigate(&state.sessions, args.user, direction, NAV_PAGE_SIZE)?;

    // navigate committed the move; re-read for the page indicator.
    let session = state
        .sessions
        .get(args.user)
        .ok_or_else(|| AppError::NoActiveSession(format!("user {}", args.user)))?;
    let summary = search::page_summary("", session.results.len(), session.current_page, NAV_PAGE_SIZE);

    Ok(ToolResult::text(render_search_page(&summary, &items, has_more)))
}
